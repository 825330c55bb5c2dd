use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::kind::{self, Encodable};
use crate::{BoxError, MarshalError, Result, TypeKey, Value};

type ConvertFn = dyn Fn(&dyn Any) -> Result<String, BoxError> + Send + Sync;

/// A conversion function turning one concrete value into its raw string.
///
/// Cloning is cheap and keeps identity: clones compare equal under
/// [`MarshalFunc::ptr_eq`].
#[derive(Clone)]
pub struct MarshalFunc(Arc<ConvertFn>);

impl MarshalFunc {
    /// Wraps a function over type-erased values.
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&dyn Any) -> Result<String, BoxError> + Send + Sync + 'static,
    {
        Self(Arc::new(func))
    }

    /// Wraps a function over `&T`. The erased value is downcast before the
    /// call; a value of any other type fails with
    /// [`MarshalError::TypeMismatch`].
    pub fn typed<T, F, E>(func: F) -> Self
    where
        T: Any,
        F: Fn(&T) -> Result<String, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        Self::new(move |value: &dyn Any| match value.downcast_ref::<T>() {
            Some(value) => func(value).map_err(Into::into),
            None => Err(MarshalError::TypeMismatch {
                expected: TypeKey::of::<T>(),
            }
            .into()),
        })
    }

    /// Registers `T`'s [`Display`](fmt::Display) output as its raw string.
    pub fn display<T: Any + fmt::Display>() -> Self {
        Self::typed(|value: &T| Ok::<_, BoxError>(value.to_string()))
    }

    /// Calls the function directly, without any pointer handling.
    pub fn call(&self, value: &dyn Any) -> Result<String, BoxError> {
        (self.0)(value)
    }

    /// Executes the function for `value`.
    ///
    /// Pointers are followed first; a nil pointer at any depth yields an
    /// empty [`Value`] and the function is never called.
    pub fn exec(&self, value: &dyn Encodable) -> Result<Value> {
        let type_key = value.type_key();
        let Some(value) = kind::deref(value) else {
            return Ok(Value::default());
        };

        self.call(value.as_any())
            .map(Value::from)
            .map_err(|source| MarshalError::Conversion { type_key, source })
    }

    /// Whether both handles point at the same function.
    pub fn ptr_eq(&self, other: &MarshalFunc) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for MarshalFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarshalFunc").finish_non_exhaustive()
    }
}
