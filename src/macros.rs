//! Macros for opting types into encoding and for creating process-wide
//! marshalers.

/// Implements [`Encodable`](crate::Encodable) for opaque types.
///
/// The types report [`Kind::Unsupported`](crate::Kind::Unsupported), so they
/// marshal through a registered conversion function or not at all.
///
/// ```rust
/// use rawconv::{impl_encodable, BoxError, Marshaler};
///
/// struct Endpoint {
///     host: String,
///     port: u16,
/// }
///
/// impl_encodable!(Endpoint);
///
/// let mut marshaler = Marshaler::new();
/// marshaler.register_fn(|e: &Endpoint| Ok::<_, BoxError>(format!("{}:{}", e.host, e.port)));
///
/// let endpoint = Endpoint { host: "localhost".into(), port: 8080 };
/// assert_eq!(marshaler.marshal(&endpoint).unwrap(), "localhost:8080");
/// ```
#[macro_export]
macro_rules! impl_encodable {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Encodable for $ty {
                fn as_any(&self) -> &dyn ::std::any::Any {
                    self
                }
            }
        )+
    };
}

/// Creates a process-wide marshaler with a single macro invocation.
///
/// The macro generates a module containing:
/// - the marshaler static (hidden)
/// - an `Api` struct that implements [`MarshalerApi`](crate::MarshalerApi)
/// - free functions `register`, `register_fn`, `register_display`, `func` and `marshal`
///
/// Like any [`Marshaler`](crate::Marshaler), it falls back to the default
/// marshaler for types it has no function for, and its registrations are
/// invisible to every other marshaler.
///
/// # Examples
///
/// ```rust
/// use rawconv::{define_marshaler, BoxError};
///
/// define_marshaler!(env);
///
/// env::register_fn(|v: &bool| Ok::<_, BoxError>(if *v { "1" } else { "0" }.to_string()));
///
/// assert_eq!(env::marshal(&true).unwrap(), "1");
/// assert_eq!(env::marshal(&42u8).unwrap(), "42");
/// assert_eq!(rawconv::marshal(&true).unwrap(), "true");
/// ```
///
/// # Trait-Based Usage
///
/// ```rust
/// use rawconv::{define_marshaler, MarshalerApi};
///
/// define_marshaler!(app);
///
/// app::API.register_display::<char>();
/// assert!(app::API.func(rawconv::TypeKey::of::<char>()).is_some());
/// ```
#[macro_export]
macro_rules! define_marshaler {
    ($name:ident) => {
        pub mod $name {
            #![allow(dead_code)]

            use std::any::Any;
            use std::fmt::Display;
            use std::sync::{LazyLock, RwLock};

            use $crate::MarshalerApi as _;

            static MARSHALER: $crate::MarshalerCell =
                LazyLock::new(|| RwLock::new($crate::Marshaler::new()));

            /// Zero-sized handle implementing the marshaler API.
            pub struct Api;

            impl $crate::MarshalerApi for Api {
                fn marshaler() -> &'static $crate::MarshalerCell {
                    &MARSHALER
                }
            }

            pub const API: Api = Api;

            /// Register a conversion function for `key`.
            pub fn register(key: $crate::TypeKey, func: $crate::MarshalFunc) {
                API.register(key, func)
            }

            /// Register a typed conversion function for `T`.
            pub fn register_fn<T, F, E>(func: F)
            where
                T: Any,
                F: Fn(&T) -> ::std::result::Result<String, E> + Send + Sync + 'static,
                E: Into<$crate::BoxError>,
            {
                API.register_fn::<T, F, E>(func)
            }

            /// Register `T`'s `Display` output as its raw string.
            pub fn register_display<T: Any + Display>() {
                API.register_display::<T>()
            }

            /// The function for `key`, falling back to the default marshaler.
            pub fn func(key: $crate::TypeKey) -> Option<$crate::MarshalFunc> {
                API.func(key)
            }

            /// Marshal `value` to its raw string representation.
            pub fn marshal(value: &dyn $crate::Encodable) -> $crate::Result<$crate::Value> {
                API.marshal(value)
            }
        }
    };
}
