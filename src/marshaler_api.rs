//! Trait giving a process-wide marshaler its operations.
//!
//! A static marshaler is a `LazyLock<RwLock<Marshaler>>`. Implementors only
//! provide access to that static; registration, lookup and marshaling come from
//! the default methods. The default marshaler and every marshaler created with
//! [`define_marshaler!`](crate::define_marshaler) work this way.

use std::any::Any;
use std::fmt::Display;
use std::sync::{LazyLock, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::kind::Encodable;
use crate::marshaler::{encode, own_func};
use crate::{global, BoxError, MarshalFunc, Marshaler, Result, TypeKey, Value};

/// Storage of a process-wide marshaler.
pub type MarshalerCell = LazyLock<RwLock<Marshaler>>;

/// Operations on a process-wide marshaler.
///
/// Registration takes the write lock, lookups take the read lock only long
/// enough to clone the function. Conversion functions run with no lock held, so
/// they may marshal other values themselves.
///
/// Registrations are meant to happen during start-up, before values are
/// marshaled from several threads.
pub trait MarshalerApi {
    /// Access the marshaler static.
    fn marshaler() -> &'static MarshalerCell;

    /// Read access to the marshaler.
    ///
    /// # Lock Poisoning Recovery
    ///
    /// A poisoned lock is recovered: registrations are single map inserts and
    /// cannot leave the registry half-written.
    fn read(&self) -> RwLockReadGuard<'static, Marshaler> {
        Self::marshaler().read().unwrap_or_else(|p| p.into_inner())
    }

    /// Write access to the marshaler. Poisoning is recovered like in [`read`](MarshalerApi::read).
    fn write(&self) -> RwLockWriteGuard<'static, Marshaler> {
        Self::marshaler().write().unwrap_or_else(|p| p.into_inner())
    }

    /// Register `func` for `key`, replacing any previous function.
    fn register(&self, key: TypeKey, func: MarshalFunc) {
        self.write().register(key, func);
    }

    /// Register a typed function for `T`.
    fn register_fn<T, F, E>(&self, func: F)
    where
        T: Any,
        F: Fn(&T) -> Result<String, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        self.register(TypeKey::of::<T>(), MarshalFunc::typed::<T, F, E>(func));
    }

    /// Register `T`'s `Display` output as its raw string.
    fn register_display<T: Any + Display>(&self) {
        self.register(TypeKey::of::<T>(), MarshalFunc::display::<T>());
    }

    /// The function for `key`, falling back to the default marshaler.
    fn func(&self, key: TypeKey) -> Option<MarshalFunc> {
        let own = own_func(self.read().registry(), key);
        own.or_else(|| global::default_func(key))
    }

    /// Marshal `value` to its raw string representation.
    fn marshal(&self, value: &dyn Encodable) -> Result<Value> {
        let func = self.func(value.type_key());
        encode(value, func.as_ref())
    }

    /// A copy of the marshaler, detached from the static.
    fn snapshot(&self) -> Marshaler {
        self.read().clone()
    }
}
