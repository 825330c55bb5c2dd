//! Per-marshaler storage of conversion functions.
//!
//! The registry is type-based: each type (`TypeId`) maps to at most one
//! [`MarshalFunc`]. Adding a function for a type that already has one replaces
//! the previous entry. Storage is only allocated on the first `add`, so a
//! marshaler that never registers anything carries no map at all.

use std::any::TypeId;
use std::collections::HashMap;

use crate::{MarshalFunc, TypeKey};

#[derive(Clone, Default)]
pub struct Registry {
    entries: Option<HashMap<TypeId, (TypeKey, MarshalFunc)>>,
}

impl Registry {
    pub const fn new() -> Self {
        Self { entries: None }
    }

    /// Inserts `func` for `key`, returning the function it replaced.
    pub fn add(&mut self, key: TypeKey, func: MarshalFunc) -> Option<MarshalFunc> {
        self.entries
            .get_or_insert_with(HashMap::new)
            .insert(key.id(), (key, func))
            .map(|(_, previous)| previous)
    }

    /// The function registered for `key`, if any. An uninitialized registry
    /// behaves as an empty one.
    pub fn find(&self, key: TypeKey) -> Option<&MarshalFunc> {
        self.entries
            .as_ref()
            .and_then(|entries| entries.get(&key.id()))
            .map(|(_, func)| func)
    }

    /// Whether anything was ever added.
    pub fn initialized(&self) -> bool {
        self.entries.is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.as_ref().map_or(0, HashMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registered type keys, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = TypeKey> + '_ {
        self.entries
            .iter()
            .flat_map(|entries| entries.values().map(|(key, _)| *key))
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.keys()).finish()
    }
}
