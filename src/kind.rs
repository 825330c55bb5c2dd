//! Type introspection for encodable values.
//!
//! Every value handed to a [`Marshaler`](crate::Marshaler) implements
//! [`Encodable`], which reports the value's [`Kind`]: one of the built-in
//! primitive kinds, a pointer (possibly nil) or `Unsupported`. Built-in
//! formatting switches on the kind; registered conversion functions receive the
//! dereferenced value as `&dyn Any`.

use std::any::Any;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::TypeKey;

/// A complex number, only as far as encoding needs it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Complex<T> {
    pub re: T,
    pub im: T,
}

impl<T> Complex<T> {
    pub const fn new(re: T, im: T) -> Self {
        Self { re, im }
    }
}

/// Complex number with `f32` components (64 bits wide).
pub type Complex32 = Complex<f32>;
/// Complex number with `f64` components (128 bits wide).
pub type Complex64 = Complex<f64>;

/// Built-in category of a value.
#[derive(Clone, Copy)]
pub enum Kind<'a> {
    Str(&'a str),
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    Usize(usize),
    F32(f32),
    F64(f64),
    Complex64(Complex32),
    Complex128(Complex64),
    /// Pointer-like indirection. `None` is a nil pointer.
    Ptr(Option<&'a dyn Encodable>),
    Unsupported,
}

impl fmt::Debug for Kind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Str(v) => f.debug_tuple("Str").field(v).finish(),
            Kind::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Kind::I8(v) => f.debug_tuple("I8").field(v).finish(),
            Kind::I16(v) => f.debug_tuple("I16").field(v).finish(),
            Kind::I32(v) => f.debug_tuple("I32").field(v).finish(),
            Kind::I64(v) => f.debug_tuple("I64").field(v).finish(),
            Kind::I128(v) => f.debug_tuple("I128").field(v).finish(),
            Kind::Isize(v) => f.debug_tuple("Isize").field(v).finish(),
            Kind::U8(v) => f.debug_tuple("U8").field(v).finish(),
            Kind::U16(v) => f.debug_tuple("U16").field(v).finish(),
            Kind::U32(v) => f.debug_tuple("U32").field(v).finish(),
            Kind::U64(v) => f.debug_tuple("U64").field(v).finish(),
            Kind::U128(v) => f.debug_tuple("U128").field(v).finish(),
            Kind::Usize(v) => f.debug_tuple("Usize").field(v).finish(),
            Kind::F32(v) => f.debug_tuple("F32").field(v).finish(),
            Kind::F64(v) => f.debug_tuple("F64").field(v).finish(),
            Kind::Complex64(v) => f.debug_tuple("Complex64").field(v).finish(),
            Kind::Complex128(v) => f.debug_tuple("Complex128").field(v).finish(),
            Kind::Ptr(None) => f.write_str("Ptr(nil)"),
            Kind::Ptr(Some(v)) => write!(f, "Ptr({})", v.type_key()),
            Kind::Unsupported => f.write_str("Unsupported"),
        }
    }
}

/// A value the marshaler can inspect.
///
/// Only [`as_any`](Encodable::as_any) must be written by hand; the
/// [`impl_encodable!`](crate::impl_encodable) macro does that for opaque types,
/// which then need a registered conversion function. Types that wrap a
/// primitive can override [`kind`](Encodable::kind) to get built-in formatting.
///
/// Implementors must be `'static`, since the registry is keyed by
/// [`TypeId`](std::any::TypeId). Borrowed data such as a non-static `&str`
/// has to be passed as an owned `String` instead.
///
/// ```rust
/// use std::any::Any;
/// use rawconv::{Encodable, Kind, Marshaler};
///
/// struct Port(u16);
///
/// impl Encodable for Port {
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
///
///     fn kind(&self) -> Kind<'_> {
///         Kind::U16(self.0)
///     }
/// }
///
/// let value = Marshaler::new().marshal(&Port(8080)).unwrap();
/// assert_eq!(value, "8080");
/// ```
pub trait Encodable: Any {
    fn as_any(&self) -> &dyn Any;

    fn kind(&self) -> Kind<'_> {
        Kind::Unsupported
    }

    /// Registry key of the concrete type.
    fn type_key(&self) -> TypeKey {
        TypeKey::of::<Self>()
    }
}

/// Follows pointer kinds down to the pointee.
///
/// Returns `None` as soon as a nil pointer is met, at any depth.
pub fn deref(value: &dyn Encodable) -> Option<&dyn Encodable> {
    let mut value = value;
    loop {
        match value.kind() {
            Kind::Ptr(Some(inner)) => value = inner,
            Kind::Ptr(None) => return None,
            _ => return Some(value),
        }
    }
}

macro_rules! primitive {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Encodable for $ty {
                fn as_any(&self) -> &dyn Any {
                    self
                }

                fn kind(&self) -> Kind<'_> {
                    Kind::$variant(*self)
                }
            }
        )*
    };
}

primitive! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    Complex32 => Complex64,
    Complex64 => Complex128,
}

impl Encodable for String {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn kind(&self) -> Kind<'_> {
        Kind::Str(self)
    }
}

impl Encodable for &'static str {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn kind(&self) -> Kind<'_> {
        Kind::Str(self)
    }
}

impl<T: Encodable> Encodable for Option<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn kind(&self) -> Kind<'_> {
        Kind::Ptr(self.as_ref().map(|v| v as &dyn Encodable))
    }
}

impl<T: Encodable> Encodable for Box<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn kind(&self) -> Kind<'_> {
        Kind::Ptr(Some(&**self))
    }
}

impl Encodable for Box<dyn Encodable> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn kind(&self) -> Kind<'_> {
        Kind::Ptr(Some(&**self))
    }
}

impl Encodable for Rc<dyn Encodable> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn kind(&self) -> Kind<'_> {
        Kind::Ptr(Some(&**self))
    }
}

impl Encodable for Arc<dyn Encodable> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn kind(&self) -> Kind<'_> {
        Kind::Ptr(Some(&**self))
    }
}

impl<T: Encodable> Encodable for Rc<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn kind(&self) -> Kind<'_> {
        Kind::Ptr(Some(&**self))
    }
}

impl<T: Encodable> Encodable for Arc<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn kind(&self) -> Kind<'_> {
        Kind::Ptr(Some(&**self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_kinds() {
        assert!(matches!(true.kind(), Kind::Bool(true)));
        assert!(matches!((-3i8).kind(), Kind::I8(-3)));
        assert!(matches!(7usize.kind(), Kind::Usize(7)));
        assert!(matches!("abc".to_string().kind(), Kind::Str("abc")));
        assert!(matches!("abc".kind(), Kind::Str("abc")));
        assert!(matches!(
            Complex32::new(1.0, 2.0).kind(),
            Kind::Complex64(Complex { re, im }) if re == 1.0 && im == 2.0
        ));
    }

    #[test]
    fn test_type_key_is_concrete_type() {
        let boxed: Box<dyn Encodable> = Box::new(5u8);
        assert_eq!(boxed.type_key(), TypeKey::of::<Box<dyn Encodable>>());
        assert_eq!((*boxed).type_key(), TypeKey::of::<u8>());
    }

    #[test]
    fn test_deref_follows_every_level() {
        let value = Some(Box::new(Arc::new(42i32)));
        let inner = deref(&value).unwrap();
        assert_eq!(inner.type_key(), TypeKey::of::<i32>());
        assert_eq!(inner.as_any().downcast_ref::<i32>(), Some(&42));
    }

    #[test]
    fn test_deref_through_shared_trait_objects() {
        let shared: Rc<dyn Encodable> = Rc::new(Some(9u16));
        assert_eq!(deref(&shared).unwrap().type_key(), TypeKey::of::<u16>());

        let shared: Arc<dyn Encodable> = Arc::new(None::<u16>);
        assert!(deref(&shared).is_none());
        assert_eq!(shared.type_key(), TypeKey::of::<Arc<dyn Encodable>>());
    }

    #[test]
    fn test_deref_stops_at_nil() {
        let shallow: Option<u64> = None;
        assert!(deref(&shallow).is_none());

        let deep: Box<Option<Rc<u64>>> = Box::new(None);
        assert!(deref(&deep).is_none());
    }

    #[test]
    fn test_deref_non_pointer_is_identity() {
        let value = 1.5f64;
        let inner = deref(&value).unwrap();
        assert_eq!(inner.type_key(), TypeKey::of::<f64>());
    }

    #[test]
    fn test_kind_debug() {
        assert_eq!(format!("{:?}", 3u16.kind()), "U16(3)");
        assert_eq!(format!("{:?}", None::<u8>.kind()), "Ptr(nil)");
        assert_eq!(format!("{:?}", Some(1u8).kind()), "Ptr(u8)");
    }
}
