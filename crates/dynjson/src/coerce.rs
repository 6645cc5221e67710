//! Scalar conversions applied to an already-resolved value.
//!
//! Numbers are matched over a closed set of representations. A document
//! decoded from text holds number tokens: integer targets parse the token's
//! text strictly, so a decoded `42.3` or `-1` is rejected where the target
//! cannot hold it exactly. A document built from Rust values holds native
//! numbers: integers convert with a range check and floats truncate toward
//! zero. Strings that encode numbers always parse strictly.

use crate::document::Origin;
use crate::duration::parse_duration;
use crate::error::{Error, Result};
use chrono::{DateTime, FixedOffset, TimeDelta};
use serde_json::{Number, Value};

/// The numeric forms a resolved number can take.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Numeric<'a> {
    /// A number decoded from JSON text, read back through its literal.
    Token(&'a Number),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
}

impl<'a> Numeric<'a> {
    fn of(number: &'a Number, origin: Origin) -> Option<Self> {
        if origin == Origin::Decoded {
            Some(Numeric::Token(number))
        } else if let Some(u) = number.as_u64() {
            Some(Numeric::Unsigned(u))
        } else if let Some(i) = number.as_i64() {
            Some(Numeric::Signed(i))
        } else {
            number.as_f64().map(Numeric::Float)
        }
    }
}

fn numeric(value: &Value, origin: Origin) -> Result<Numeric<'_>> {
    match value {
        Value::Number(n) => Numeric::of(n, origin).ok_or(Error::Type { expected: "number" }),
        _ => Err(Error::Type { expected: "number" }),
    }
}

fn parse_literal<T>(text: &str, target: &'static str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    text.parse::<T>().map_err(|e| Error::parse(text, target, e))
}

fn out_of_range(value: impl ToString, target: &'static str) -> Error {
    Error::Range {
        value: value.to_string(),
        target,
    }
}

pub(crate) fn to_bool(value: &Value, _: Origin) -> Result<bool> {
    value.as_bool().ok_or(Error::Type { expected: "bool" })
}

pub(crate) fn to_string(value: &Value, _: Origin) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or(Error::Type { expected: "string" })
}

pub(crate) fn to_float64(value: &Value, origin: Origin) -> Result<f64> {
    if let Value::String(s) = value {
        return parse_literal(s, "f64");
    }
    match numeric(value, origin)? {
        Numeric::Token(n) => n.as_f64().ok_or(Error::Type { expected: "number" }),
        Numeric::Unsigned(u) => Ok(u as f64),
        Numeric::Signed(i) => Ok(i as f64),
        Numeric::Float(f) => Ok(f),
    }
}

/// Lenient integer: the `f64` reading truncated toward zero.
pub(crate) fn to_int(value: &Value, origin: Origin) -> Result<i64> {
    to_float64(value, origin).map(|f| f as i64)
}

pub(crate) fn to_int64(value: &Value, origin: Origin) -> Result<i64> {
    if let Value::String(s) = value {
        return parse_literal(s, "i64");
    }
    match numeric(value, origin)? {
        Numeric::Token(n) => parse_literal(&n.to_string(), "i64"),
        Numeric::Unsigned(u) => i64::try_from(u).map_err(|_| out_of_range(u, "i64")),
        Numeric::Signed(i) => Ok(i),
        Numeric::Float(f) => {
            let t = f.trunc();
            // i64::MIN is exact as an f64, i64::MAX rounds up to 2^63.
            if t >= i64::MIN as f64 && t < i64::MAX as f64 {
                Ok(t as i64)
            } else {
                Err(out_of_range(f, "i64"))
            }
        }
    }
}

pub(crate) fn to_uint64(value: &Value, origin: Origin) -> Result<u64> {
    if let Value::String(s) = value {
        return parse_literal(s, "u64");
    }
    match numeric(value, origin)? {
        Numeric::Token(n) => parse_literal(&n.to_string(), "u64"),
        Numeric::Unsigned(u) => Ok(u),
        Numeric::Signed(i) => u64::try_from(i).map_err(|_| out_of_range(i, "u64")),
        Numeric::Float(f) => {
            let t = f.trunc();
            if t >= 0.0 && t < u64::MAX as f64 {
                Ok(t as u64)
            } else {
                Err(out_of_range(f, "u64"))
            }
        }
    }
}

/// RFC 3339 text, the form chrono's `Serialize` produces for `DateTime`.
pub(crate) fn to_time(value: &Value, _: Origin) -> Result<DateTime<FixedOffset>> {
    match value {
        Value::String(s) => {
            DateTime::parse_from_rfc3339(s).map_err(|e| Error::parse(s, "RFC 3339 time", e))
        }
        _ => Err(Error::Type { expected: "time" }),
    }
}

pub(crate) fn to_duration(value: &Value, _: Origin) -> Result<TimeDelta> {
    let s = value.as_str().ok_or(Error::Type { expected: "string" })?;
    parse_duration(s).map_err(|e| Error::parse(s, "duration", e))
}
