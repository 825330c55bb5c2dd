//! Conversion functions registered on the default marshaler at start-up.
//!
//! These are plain registrations; a marshaler can override any of them with
//! its own function.

use std::convert::Infallible;
use std::fmt::Write as _;
use std::time::Duration;

use crate::{impl_encodable, Marshaler};

impl_encodable!(Duration);

#[cfg(feature = "url")]
impl_encodable!(url::Url);

pub(crate) fn register_builtins(marshaler: &mut Marshaler) {
    marshaler.register_fn(|d: &Duration| Ok::<_, Infallible>(format_duration(*d)));

    #[cfg(feature = "url")]
    marshaler.register_fn(|u: &url::Url| Ok::<_, Infallible>(u.as_str().to_owned()));
}

/// Formats a duration as hours, minutes and seconds, e.g. `1h2m3.5s`.
///
/// Durations under a second use the largest fitting unit of `ms`, `µs` and
/// `ns`. Trailing zeros of the fraction are dropped and a zero duration is `0s`.
pub fn format_duration(d: Duration) -> String {
    let nanos = d.as_nanos();
    match nanos {
        0 => return "0s".to_owned(),
        1..=999 => return format!("{nanos}ns"),
        1_000..=999_999 => return format!("{}µs", scaled(nanos, 3)),
        1_000_000..=999_999_999 => return format!("{}ms", scaled(nanos, 6)),
        _ => {}
    }

    let secs = d.as_secs();
    let (hours, minutes, seconds) = (secs / 3600, secs / 60 % 60, secs % 60);

    let mut out = String::new();
    if hours > 0 {
        let _ = write!(out, "{hours}h");
    }
    if hours > 0 || minutes > 0 {
        let _ = write!(out, "{minutes}m");
    }
    let _ = write!(
        out,
        "{seconds}{}s",
        fraction(u128::from(d.subsec_nanos()), 9)
    );
    out
}

fn scaled(value: u128, digits: u32) -> String {
    let unit = 10u128.pow(digits);
    format!("{}{}", value / unit, fraction(value % unit, digits))
}

fn fraction(rem: u128, digits: u32) -> String {
    if rem == 0 {
        return String::new();
    }
    let padded = format!("{:0width$}", rem, width = digits as usize);
    format!(".{}", padded.trim_end_matches('0'))
}
