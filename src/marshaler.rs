//! The resolving and dispatching half of the crate.

use std::any::Any;
use std::fmt::Display;

use tracing::{debug, trace};

use crate::kind::{self, Encodable};
use crate::registry::Registry;
use crate::{format, global, BoxError, MarshalError, MarshalFunc, Result, TypeKey, Value};

/// Marshals any [`Encodable`] value to its raw string [`Value`].
///
/// Conversion functions registered with [`Marshaler::register`] only apply to
/// this marshaler. Types it has no function for fall back to the default
/// marshaler (see [`register_marshal_func`](crate::register_marshal_func)),
/// and values with no function anywhere are formatted by kind.
///
/// `Marshaler::default()` is an empty, fully usable marshaler.
///
/// ```rust
/// use rawconv::{BoxError, Marshaler};
///
/// let mut marshaler = Marshaler::new();
/// marshaler.register_fn(|v: &bool| Ok::<_, BoxError>(if *v { "yes" } else { "no" }.into()));
///
/// assert_eq!(marshaler.marshal(&true).unwrap(), "yes");
/// assert_eq!(rawconv::marshal(&true).unwrap(), "true");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Marshaler {
    registry: Registry,
}

impl Marshaler {
    pub const fn new() -> Self {
        Self {
            registry: Registry::new(),
        }
    }

    /// Registers `func` for `key` on this marshaler only. A previous function
    /// for the same type is replaced.
    pub fn register(&mut self, key: TypeKey, func: MarshalFunc) -> &mut Self {
        let replaced = self.registry.add(key, func).is_some();
        debug!(type_name = key.name(), replaced, "registered marshal func");
        self
    }

    /// Registers a typed function for `T`.
    pub fn register_fn<T, F, E>(&mut self, func: F) -> &mut Self
    where
        T: Any,
        F: Fn(&T) -> Result<String, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        self.register(TypeKey::of::<T>(), MarshalFunc::typed::<T, F, E>(func))
    }

    /// Registers `T`'s `Display` output as its raw string.
    pub fn register_display<T: Any + Display>(&mut self) -> &mut Self {
        self.register(TypeKey::of::<T>(), MarshalFunc::display::<T>())
    }

    /// The function for `key`: this marshaler's own registration first, then
    /// the default marshaler's.
    pub fn func(&self, key: TypeKey) -> Option<MarshalFunc> {
        match own_func(&self.registry, key) {
            Some(func) => {
                trace!(type_name = key.name(), "marshal func found on marshaler");
                Some(func)
            }
            None => global::default_func(key),
        }
    }

    /// Marshals `value` to its raw string representation.
    ///
    /// # Errors
    ///
    /// - [`MarshalError::Conversion`] when a registered function fails
    /// - [`MarshalError::UnsupportedType`] when no function is registered and
    ///   the value's kind has no built-in formatting
    pub fn marshal(&self, value: &dyn Encodable) -> Result<Value> {
        let func = self.func(value.type_key());
        encode(value, func.as_ref())
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

/// Looks up `key` in `registry`, skipping the map entirely when nothing was
/// ever registered.
pub(crate) fn own_func(registry: &Registry, key: TypeKey) -> Option<MarshalFunc> {
    if !registry.initialized() {
        return None;
    }
    registry.find(key).cloned()
}

/// Encodes `value` with the resolved `func`, or by kind when there is none.
pub(crate) fn encode(value: &dyn Encodable, func: Option<&MarshalFunc>) -> Result<Value> {
    if let Some(func) = func {
        return func.exec(value);
    }

    let Some(inner) = kind::deref(value) else {
        return Ok(Value::default());
    };

    format::format_kind(inner.kind())
        .map(Value::from)
        .ok_or_else(|| MarshalError::UnsupportedType(value.type_key()))
}
