//! Built-in formatting for primitive kinds.

use crate::kind::{Complex, Kind};

/// Formats a primitive kind, or returns `None` when the kind has no built-in
/// representation (pointers must be dereferenced before calling this).
pub(crate) fn format_kind(kind: Kind<'_>) -> Option<String> {
    let raw = match kind {
        Kind::Str(v) => v.to_owned(),
        Kind::Bool(v) => v.to_string(),
        Kind::I8(v) => v.to_string(),
        Kind::I16(v) => v.to_string(),
        Kind::I32(v) => v.to_string(),
        Kind::I64(v) => v.to_string(),
        Kind::I128(v) => v.to_string(),
        Kind::Isize(v) => v.to_string(),
        Kind::U8(v) => v.to_string(),
        Kind::U16(v) => v.to_string(),
        Kind::U32(v) => v.to_string(),
        Kind::U64(v) => v.to_string(),
        Kind::U128(v) => v.to_string(),
        Kind::Usize(v) => v.to_string(),
        Kind::F32(v) => format_f32(v),
        Kind::F64(v) => format_f64(v),
        Kind::Complex64(v) => format_complex(v, format_f32),
        Kind::Complex128(v) => format_complex(v, format_f64),
        Kind::Ptr(_) | Kind::Unsupported => return None,
    };
    Some(raw)
}

/// Shortest round-trip representation of an `f32`.
pub fn format_f32(v: f32) -> String {
    if let Some(special) = special(v.is_nan(), v.is_infinite(), v.is_sign_negative()) {
        return special.to_owned();
    }
    general(&format!("{:e}", v))
}

/// Shortest round-trip representation of an `f64`.
pub fn format_f64(v: f64) -> String {
    if let Some(special) = special(v.is_nan(), v.is_infinite(), v.is_sign_negative()) {
        return special.to_owned();
    }
    general(&format!("{:e}", v))
}

fn format_complex<T: Copy>(v: Complex<T>, component: fn(T) -> String) -> String {
    let re = component(v.re);
    let mut im = component(v.im);
    if !im.starts_with('+') && !im.starts_with('-') {
        im.insert(0, '+');
    }
    format!("({re}{im}i)")
}

fn special(nan: bool, infinite: bool, negative: bool) -> Option<&'static str> {
    match (nan, infinite, negative) {
        (true, _, _) => Some("NaN"),
        (_, true, false) => Some("+Inf"),
        (_, true, true) => Some("-Inf"),
        _ => None,
    }
}

/// Rewrites Rust's shortest scientific output (`1.25e-7`, `3e0`) in the
/// general style: plain decimal for exponents in `-4..6`, otherwise
/// `d.ddde±XX`.
fn general(scientific: &str) -> String {
    let (negative, scientific) = match scientific.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, scientific),
    };
    let (mantissa, exp) = scientific.split_once('e').unwrap_or((scientific, "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    let mut out = String::with_capacity(digits.len() + 8);
    if negative {
        out.push('-');
    }

    if exp < -4 || exp >= 6 {
        out.push_str(&digits[..1]);
        if digits.len() > 1 {
            out.push('.');
            out.push_str(&digits[1..]);
        }
        out.push('e');
        out.push(if exp < 0 { '-' } else { '+' });
        let abs = exp.unsigned_abs();
        if abs < 10 {
            out.push('0');
        }
        out.push_str(&abs.to_string());
        return out;
    }

    // position of the decimal point relative to the first digit
    let point = exp + 1;
    if point <= 0 {
        out.push_str("0.");
        out.extend(std::iter::repeat('0').take(point.unsigned_abs() as usize));
        out.push_str(&digits);
    } else {
        let point = point as usize;
        if point >= digits.len() {
            out.push_str(&digits);
            out.extend(std::iter::repeat('0').take(point - digits.len()));
        } else {
            out.push_str(&digits[..point]);
            out.push('.');
            out.push_str(&digits[point..]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_f64_plain() {
        assert_eq!(format_f64(3.25), "3.25");
        assert_eq!(format_f64(0.0), "0");
        assert_eq!(format_f64(-0.0), "-0");
        assert_eq!(format_f64(1.0), "1");
        assert_eq!(format_f64(-2.5), "-2.5");
        assert_eq!(format_f64(100000.0), "100000");
        assert_eq!(format_f64(123456.0), "123456");
        assert_eq!(format_f64(0.0001), "0.0001");
        assert_eq!(format_f64(0.00012), "0.00012");
    }

    #[test]
    fn test_format_f64_exponent() {
        assert_eq!(format_f64(1e6), "1e+06");
        assert_eq!(format_f64(1234567.0), "1.234567e+06");
        assert_eq!(format_f64(0.00001), "1e-05");
        assert_eq!(format_f64(1.5e-7), "1.5e-07");
        assert_eq!(format_f64(1e100), "1e+100");
        assert_eq!(format_f64(-2.5e21), "-2.5e+21");
        assert_eq!(format_f64(f64::MAX), "1.7976931348623157e+308");
    }

    #[test]
    fn test_format_f64_special() {
        assert_eq!(format_f64(f64::NAN), "NaN");
        assert_eq!(format_f64(f64::INFINITY), "+Inf");
        assert_eq!(format_f64(f64::NEG_INFINITY), "-Inf");
    }

    #[test]
    fn test_format_f32_uses_f32_width() {
        assert_eq!(format_f32(3.25), "3.25");
        assert_eq!(format_f32(0.1), "0.1");
        assert_eq!(format_f32(16777216.0), "1.6777216e+07");
        assert_eq!(format_f32(f32::NEG_INFINITY), "-Inf");
        // the same value widened needs more digits
        assert_eq!(format_f64(0.1f32 as f64), "0.10000000149011612");
    }

    #[test]
    fn test_float_round_trip() {
        let samples64 = [
            3.25,
            -0.1,
            1.0 / 3.0,
            2.0f64.powi(60),
            5e-324,
            f64::MIN_POSITIVE,
            123456.789,
            -9.87654321e-5,
        ];
        for v in samples64 {
            assert_eq!(format_f64(v).parse::<f64>().unwrap(), v, "{v:e}");
        }

        let samples32 = [3.25f32, -0.1, 1.0 / 3.0, f32::MAX, f32::MIN_POSITIVE, 1e-45];
        for v in samples32 {
            assert_eq!(format_f32(v).parse::<f32>().unwrap(), v, "{v:e}");
        }
    }

    #[test]
    fn test_format_complex() {
        let kind = Kind::Complex128(Complex::new(1.0, 2.0));
        assert_eq!(format_kind(kind).unwrap(), "(1+2i)");

        let kind = Kind::Complex128(Complex::new(-1.5, -0.25));
        assert_eq!(format_kind(kind).unwrap(), "(-1.5-0.25i)");

        let kind = Kind::Complex64(Complex::new(0.1, f32::INFINITY));
        assert_eq!(format_kind(kind).unwrap(), "(0.1+Infi)");

        let kind = Kind::Complex128(Complex::new(1e7, f64::NAN));
        assert_eq!(format_kind(kind).unwrap(), "(1e+07+NaNi)");
    }

    #[test]
    fn test_format_integers_and_bools() {
        assert_eq!(format_kind(Kind::I32(-42)).unwrap(), "-42");
        assert_eq!(format_kind(Kind::U8(200)).unwrap(), "200");
        assert_eq!(format_kind(Kind::I64(i64::MIN)).unwrap(), "-9223372036854775808");
        assert_eq!(format_kind(Kind::U64(u64::MAX)).unwrap(), "18446744073709551615");
        assert_eq!(format_kind(Kind::Bool(true)).unwrap(), "true");
        assert_eq!(format_kind(Kind::Bool(false)).unwrap(), "false");
        assert_eq!(format_kind(Kind::Str("as is")).unwrap(), "as is");
    }

    #[test]
    fn test_no_builtin_for_pointer_or_unsupported() {
        assert!(format_kind(Kind::Unsupported).is_none());
        assert!(format_kind(Kind::Ptr(None)).is_none());
    }
}
