//! # rawconv
//!
//! Encode typed runtime values into a single raw string representation, the
//! [`Value`] exchanged by text based configuration and serialization layers.
//!
//! Values are inspected through the [`Encodable`] trait. A [`Marshaler`]
//! resolves a conversion function for the value's type, first in its own
//! registry, then in the process-wide default marshaler's registry. Values
//! without a conversion function are formatted by their [`Kind`]: strings
//! verbatim, booleans as `true`/`false`, integers in base 10, floats and
//! complex numbers in their shortest round-trip form. Nil pointers (`None`)
//! always encode to an empty value.
//!
//! ## Quick Start
//!
//! ```rust
//! use rawconv::{impl_encodable, marshal, register_marshal_fn, BoxError};
//!
//! struct Level(u8);
//! impl_encodable!(Level);
//!
//! register_marshal_fn(|l: &Level| Ok::<_, BoxError>(format!("L{}", l.0)));
//!
//! assert_eq!(marshal(&Level(3)).unwrap(), "L3");
//! assert_eq!(marshal(&2.5f64).unwrap(), "2.5");
//! assert_eq!(marshal(&None::<Level>).unwrap(), "");
//! ```
//!
//! ## Concurrency
//!
//! Register conversion functions during start-up. Marshaling from many
//! threads is fine once registration is done.
//!
//! ## Main Functions
//!
//! - [`marshal`] - Marshal a value with the default marshaler
//! - [`register_marshal_func`] - Register a conversion function on the default marshaler
//! - [`register_marshal_fn`] - Register a typed closure on the default marshaler
//! - [`register_display`] - Register a type's `Display` output on the default marshaler
//! - [`get_marshal_func`] - Look up a conversion function on the default marshaler

mod builtin;
mod error;
mod format;
mod global;
mod kind;
mod macros;
mod marshal_func;
mod marshaler;
mod marshaler_api;
mod registry;
mod type_key;
mod value;

pub use builtin::format_duration;
pub use error::{BoxError, MarshalError, Result};
pub use format::{format_f32, format_f64};
pub use global::{
    get_marshal_func, marshal, register_display, register_marshal_fn, register_marshal_func,
    DefaultMarshaler,
};
pub use kind::{deref, Complex, Complex32, Complex64, Encodable, Kind};
pub use marshal_func::MarshalFunc;
pub use marshaler::Marshaler;
pub use marshaler_api::{MarshalerApi, MarshalerCell};
pub use registry::Registry;
pub use type_key::TypeKey;
pub use value::Value;
