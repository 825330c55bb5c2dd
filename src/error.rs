use thiserror::Error;

use crate::TypeKey;

/// Boxed error produced by a conversion function.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by [`Marshaler::marshal`](crate::Marshaler::marshal) and friends.
#[derive(Debug, Error)]
pub enum MarshalError {
    /// No conversion function is registered for the type and its kind is not
    /// one of the built-in primitive kinds.
    #[error("unsupported type {0}")]
    UnsupportedType(TypeKey),

    /// A registered conversion function failed.
    #[error("failed to marshal {type_key}")]
    Conversion {
        /// Type of the value handed to `marshal`.
        type_key: TypeKey,
        #[source]
        source: BoxError,
    },

    /// A typed conversion function received a value of another type.
    #[error("type mismatch: conversion function expects {expected}")]
    TypeMismatch { expected: TypeKey },
}

impl MarshalError {
    /// The type the failure is about.
    pub fn type_key(&self) -> TypeKey {
        match self {
            MarshalError::UnsupportedType(key) => *key,
            MarshalError::Conversion { type_key, .. } => *type_key,
            MarshalError::TypeMismatch { expected } => *expected,
        }
    }

    /// Returns `true` for [`MarshalError::UnsupportedType`].
    pub fn is_unsupported(&self) -> bool {
        matches!(self, MarshalError::UnsupportedType(_))
    }

    /// Consumes a [`MarshalError::Conversion`] and returns the wrapped cause.
    pub fn into_source(self) -> Option<BoxError> {
        match self {
            MarshalError::Conversion { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T, E = MarshalError> = std::result::Result<T, E>;
