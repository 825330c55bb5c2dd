//! The process-wide default marshaler.
//!
//! Every [`Marshaler`] falls back to it for types it has no function for, and
//! the crate-level free functions operate on it. It is created on first use
//! with the built-in domain registrations (`Duration`, and `url::Url` with the
//! `url` feature).

use std::any::Any;
use std::fmt::Display;
use std::sync::{LazyLock, RwLock};

use tracing::trace;

use crate::kind::Encodable;
use crate::marshaler::own_func;
use crate::marshaler_api::{MarshalerApi, MarshalerCell};
use crate::{builtin, BoxError, MarshalFunc, Marshaler, Result, TypeKey, Value};

static DEFAULT: MarshalerCell = LazyLock::new(|| {
    let mut marshaler = Marshaler::new();
    builtin::register_builtins(&mut marshaler);
    RwLock::new(marshaler)
});

/// Handle on the default marshaler.
pub struct DefaultMarshaler;

impl MarshalerApi for DefaultMarshaler {
    fn marshaler() -> &'static MarshalerCell {
        &DEFAULT
    }

    fn func(&self, key: TypeKey) -> Option<MarshalFunc> {
        default_func(key)
    }
}

/// Lookup in the default marshaler's own registry, the end of every fallback
/// chain.
pub(crate) fn default_func(key: TypeKey) -> Option<MarshalFunc> {
    let func = own_func(DefaultMarshaler.read().registry(), key);
    trace!(
        type_name = key.name(),
        found = func.is_some(),
        "marshal func lookup on default marshaler"
    );
    func
}

/// Marshal `value` to its raw string [`Value`] using the default marshaler.
///
/// Supported out of the box:
/// - `String` and `&'static str`
/// - `bool`
/// - `i8`, `i16`, `i32`, `i64`, `i128`, `isize`
/// - `u8`, `u16`, `u32`, `u64`, `u128`, `usize`
/// - `f32`, `f64`
/// - [`Complex32`](crate::Complex32), [`Complex64`](crate::Complex64)
/// - [`std::time::Duration`]
/// - `url::Url` (with the `url` feature)
/// - `Option`, `Box`, `Rc` and `Arc` of any of the above; `None` marshals to
///   an empty value
///
/// Functions are looked up by the exact type being marshaled, so the built-in
/// `Duration` function does not cover `Option<Duration>`. Such a wrapper has
/// no kind to fall back on and fails with
/// [`UnsupportedType`](crate::MarshalError::UnsupportedType) until a function
/// is registered for it.
///
/// Use [`register_marshal_func`] to add other types.
///
/// ```rust
/// use std::time::Duration;
///
/// assert_eq!(rawconv::marshal(&-42i32).unwrap(), "-42");
/// assert_eq!(rawconv::marshal(&Duration::from_millis(1500)).unwrap(), "1.5s");
/// assert_eq!(rawconv::marshal(&None::<u8>).unwrap(), "");
/// ```
pub fn marshal(value: &dyn Encodable) -> Result<Value> {
    DefaultMarshaler.marshal(value)
}

/// The function registered on the default marshaler for `key`, if any.
pub fn get_marshal_func(key: TypeKey) -> Option<MarshalFunc> {
    default_func(key)
}

/// Register `func` for `key` on the default marshaler. This affects every
/// marshaler that has no own function for `key`.
pub fn register_marshal_func(key: TypeKey, func: MarshalFunc) {
    DefaultMarshaler.register(key, func);
}

/// Register a typed function for `T` on the default marshaler.
pub fn register_marshal_fn<T, F, E>(func: F)
where
    T: Any,
    F: Fn(&T) -> Result<String, E> + Send + Sync + 'static,
    E: Into<BoxError>,
{
    DefaultMarshaler.register_fn::<T, F, E>(func);
}

/// Register `T`'s `Display` output on the default marshaler.
pub fn register_display<T: Any + Display>() {
    DefaultMarshaler.register_display::<T>();
}
