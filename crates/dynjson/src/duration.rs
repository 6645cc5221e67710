//! Duration literals: an optional sign followed by one or more
//! `<decimal><unit>` terms, such as `"1h30m"`, `"1.5h"` or `"-250ms"`.
//!
//! Units are `ns`, `us` (also `µs`), `ms`, `s`, `m` and `h`. A bare `"0"` is
//! the only literal allowed without a unit. The result is counted in whole
//! nanoseconds and must fit in an `i64`.

use chrono::TimeDelta;
use thiserror::Error;

/// Why a duration literal was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DurationError {
    #[error("invalid duration syntax")]
    Invalid,

    #[error("missing unit in duration")]
    MissingUnit,

    #[error("unknown unit {0:?} in duration")]
    UnknownUnit(String),

    #[error("duration out of range")]
    Overflow,
}

fn unit_nanos(unit: &str) -> Option<u64> {
    Some(match unit {
        "ns" => 1,
        "us" | "µs" | "μs" => 1_000,
        "ms" => 1_000_000,
        "s" => 1_000_000_000,
        "m" => 60_000_000_000,
        "h" => 3_600_000_000_000,
        _ => return None,
    })
}

fn split_digits(s: &str) -> (&str, &str) {
    s.split_at(s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len()))
}

/// Nanoseconds contributed by the digits after the decimal point.
///
/// Digits past the precision of a `u64` are ignored.
fn fraction_nanos(digits: &str, unit: u64) -> u64 {
    let mut value: u64 = 0;
    let mut scale = 1.0_f64;
    for digit in digits.bytes() {
        match value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(digit - b'0')))
        {
            Some(next) => {
                value = next;
                scale *= 10.0;
            }
            None => break,
        }
    }
    (value as f64 * (unit as f64 / scale)) as u64
}

/// Parse a duration literal into a signed [`TimeDelta`].
///
/// ```
/// use chrono::TimeDelta;
/// use dynjson::duration::parse_duration;
///
/// assert_eq!(parse_duration("1h30m").unwrap(), TimeDelta::minutes(90));
/// assert_eq!(parse_duration("-1.5s").unwrap(), TimeDelta::milliseconds(-1500));
/// assert!(parse_duration("2 days").is_err());
/// ```
///
/// # Errors
///
/// Returns a [`DurationError`] for malformed syntax, a missing or unknown unit,
/// or a total outside the `i64` nanosecond range.
pub fn parse_duration(text: &str) -> Result<TimeDelta, DurationError> {
    let (negative, mut rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    if rest == "0" {
        return Ok(TimeDelta::zero());
    }
    if rest.is_empty() {
        return Err(DurationError::Invalid);
    }

    // One past i64::MAX so that the most negative duration is reachable.
    let limit = i64::MAX.unsigned_abs() + 1;
    let within = |n: &u64| *n <= limit;

    let mut total: u64 = 0;
    while !rest.is_empty() {
        let (whole, after) = split_digits(rest);
        let (fraction, after) = match after.strip_prefix('.') {
            Some(tail) => split_digits(tail),
            None => ("", after),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(DurationError::Invalid);
        }

        let unit_len = after
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(after.len());
        let (unit, tail) = after.split_at(unit_len);
        if unit.is_empty() {
            return Err(DurationError::MissingUnit);
        }
        let scale = unit_nanos(unit).ok_or_else(|| DurationError::UnknownUnit(unit.to_string()))?;

        let whole: u64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| DurationError::Overflow)?
        };
        let term = whole
            .checked_mul(scale)
            .and_then(|n| n.checked_add(fraction_nanos(fraction, scale)))
            .filter(within)
            .ok_or(DurationError::Overflow)?;
        total = total
            .checked_add(term)
            .filter(within)
            .ok_or(DurationError::Overflow)?;
        rest = tail;
    }

    let nanos = if negative {
        0_i64.checked_sub_unsigned(total)
    } else {
        i64::try_from(total).ok()
    };
    nanos
        .map(TimeDelta::nanoseconds)
        .ok_or(DurationError::Overflow)
}
