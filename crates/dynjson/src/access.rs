//! Read access: path lookup plus typed projections of the resolved value.
//!
//! Every typed accessor comes in four shapes:
//!
//! - `int64(path)`: `Result<i64>`, failing with a path, type or parse error
//! - `int64_or(default, path)`: never fails, any error yields `default`
//! - `int64_slice(path)`: the path must hold an array whose every element
//!   converts; the first bad element fails the whole call
//! - `int64_slice_or(default, path)`
//!
//! The panicking forms live on [`Must`], obtained with [`Access::must`].

use crate::coerce;
use crate::document::Origin;
use crate::error::{Error, PathError, Result};
use crate::navigate::{self, Node};
use crate::path::Segment;
use chrono::{DateTime, FixedOffset, TimeDelta};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Invokes `$callback!` with the table of typed accessors.
macro_rules! typed_accessors {
    ($callback:ident) => {
        $callback! {
            "a native boolean" =>
                bool, bool_or, bool_slice, bool_slice_or: bool = coerce::to_bool;
            "a native string" =>
                string, string_or, string_slice, string_slice_or: String = coerce::to_string;
            "an integer, read as `f64` and truncated toward zero, so fractional \
             numbers and strings such as `\"42.3\"` are accepted" =>
                int, int_or, int_slice, int_slice_or: i64 = coerce::to_int;
            "a signed integer; decoded numbers and strings must hold an integer \
             literal in range, native floats truncate toward zero" =>
                int64, int64_or, int64_slice, int64_slice_or: i64 = coerce::to_int64;
            "an unsigned integer; decoded numbers and strings must hold a \
             non-negative integer literal in range, native floats truncate \
             toward zero" =>
                uint64, uint64_or, uint64_slice, uint64_slice_or: u64 = coerce::to_uint64;
            "an `f64`, from any number or a numeric string" =>
                float64, float64_or, float64_slice, float64_slice_or: f64 = coerce::to_float64;
            "a timestamp, from RFC 3339 text" =>
                time, time_or, time_slice, time_slice_or: DateTime<FixedOffset> = coerce::to_time;
            "a signed duration, from a literal such as `\"1s\"`, `\"-1.5h\"` or `\"1h30m\"`" =>
                duration, duration_or, duration_slice, duration_slice_or: TimeDelta = coerce::to_duration;
        }
    };
}

macro_rules! access_methods {
    ($(
        $what:literal => $name:ident, $name_or:ident, $slice:ident, $slice_or:ident: $ty:ty = $convert:path;
    )*) => {
        $(
            #[doc = concat!("Resolve `path` and read it as ", $what, ".")]
            fn $name(&self, path: &[Segment]) -> Result<$ty> {
                $convert(self.value(path)?, self.origin())
            }

            #[doc = concat!("Like [`", stringify!($name), "`](Access::", stringify!($name), "), returning `default` on any error.")]
            fn $name_or(&self, default: $ty, path: &[Segment]) -> $ty {
                self.$name(path).unwrap_or(default)
            }

            #[doc = concat!("Resolve `path` to an array and read every element as ", $what, ".")]
            fn $slice(&self, path: &[Segment]) -> Result<Vec<$ty>> {
                let origin = self.origin();
                self.array(path)?
                    .iter()
                    .map(|item| $convert(item, origin))
                    .collect()
            }

            #[doc = concat!("Like [`", stringify!($slice), "`](Access::", stringify!($slice), "), returning `default` on any error.")]
            fn $slice_or(&self, default: Vec<$ty>, path: &[Segment]) -> Vec<$ty> {
                self.$slice(path).unwrap_or(default)
            }
        )*
    };
}

macro_rules! must_methods {
    ($(
        $what:literal => $name:ident, $name_or:ident, $slice:ident, $slice_or:ident: $ty:ty = $convert:path;
    )*) => {
        $(
            #[track_caller]
            pub fn $name(&self, path: &[Segment]) -> $ty {
                or_panic(self.0.$name(path))
            }

            #[track_caller]
            pub fn $slice(&self, path: &[Segment]) -> Vec<$ty> {
                or_panic(self.0.$slice(path))
            }
        )*
    };
}

/// Read-only navigation and typed extraction.
///
/// Implemented by [`Document`](crate::Document) and by the views it hands out
/// ([`Node`], [`NodeMut`](crate::NodeMut)); paths are always relative to the
/// implementor's own root.
pub trait Access {
    /// The value every path starts from.
    fn root(&self) -> &Value;

    /// How numbers under [`root`](Access::root) are read.
    fn origin(&self) -> Origin;

    /// Resolve `path`. An empty path yields the root itself.
    ///
    /// # Errors
    ///
    /// Returns a [`PathError`] splitting `path` at the first segment that does
    /// not resolve.
    fn get(&self, path: &[Segment]) -> std::result::Result<Node<'_>, PathError> {
        match self.get_deepest(path) {
            (node, None) => Ok(node),
            (_, Some(err)) => Err(err),
        }
    }

    /// Resolve as much of `path` as possible.
    ///
    /// Always returns the deepest node reached: the target on success, the
    /// value at the error's `found_path` otherwise.
    fn get_deepest(&self, path: &[Segment]) -> (Node<'_>, Option<PathError>) {
        let (value, err) = navigate::walk(self.root(), path);
        if let Some(err) = &err {
            tracing::debug!(
                found = %err.found_path(),
                missing = %err.missing_path(),
                "path lookup stopped early"
            );
        }
        (Node::new(value, self.origin()), err)
    }

    /// The raw value at `path`.
    fn value(&self, path: &[Segment]) -> Result<&Value> {
        Ok(self.get(path)?.as_value())
    }

    fn map(&self, path: &[Segment]) -> Result<&Map<String, Value>> {
        self.value(path)?
            .as_object()
            .ok_or(Error::Type { expected: "object" })
    }

    /// An object whose members must all be strings.
    fn map_string(&self, path: &[Segment]) -> Result<BTreeMap<String, String>> {
        self.map(path)?
            .iter()
            .map(|(key, value)| match value {
                Value::String(s) => Ok((key.clone(), s.clone())),
                _ => Err(Error::Type {
                    expected: "string map value",
                }),
            })
            .collect()
    }

    fn map_string_or(
        &self,
        default: BTreeMap<String, String>,
        path: &[Segment],
    ) -> BTreeMap<String, String> {
        self.map_string(path).unwrap_or(default)
    }

    fn array(&self, path: &[Segment]) -> Result<&[Value]> {
        self.value(path)?
            .as_array()
            .map(Vec::as_slice)
            .ok_or(Error::Type { expected: "array" })
    }

    typed_accessors!(access_methods);

    /// Panicking accessors for call sites that already know the path is valid.
    fn must(&self) -> Must<'_, Self>
    where
        Self: Sized,
    {
        Must(self)
    }
}

#[track_caller]
pub(crate) fn or_panic<T, E: fmt::Display>(result: std::result::Result<T, E>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("{err}"),
    }
}

/// Accessors that panic instead of returning an error.
///
/// ```should_panic
/// use dynjson::{path, Access, Document};
///
/// let doc: Document = r#"{"port":"eighty"}"#.parse().unwrap();
/// let _port = doc.must().uint64(&path!["port"]);
/// ```
#[derive(Debug)]
pub struct Must<'a, A>(&'a A);

impl<'a, A: Access> Must<'a, A> {
    #[track_caller]
    pub fn get(&self, path: &[Segment]) -> Node<'a> {
        or_panic(self.0.get(path))
    }

    #[track_caller]
    pub fn value(&self, path: &[Segment]) -> &'a Value {
        or_panic(self.0.value(path))
    }

    #[track_caller]
    pub fn map(&self, path: &[Segment]) -> &'a Map<String, Value> {
        or_panic(self.0.map(path))
    }

    #[track_caller]
    pub fn map_string(&self, path: &[Segment]) -> BTreeMap<String, String> {
        or_panic(self.0.map_string(path))
    }

    #[track_caller]
    pub fn array(&self, path: &[Segment]) -> &'a [Value] {
        or_panic(self.0.array(path))
    }

    typed_accessors!(must_methods);
}

impl Access for Node<'_> {
    fn root(&self) -> &Value {
        self.as_value()
    }

    fn origin(&self) -> Origin {
        self.origin()
    }
}

impl Access for crate::NodeMut<'_> {
    fn root(&self) -> &Value {
        self.as_value()
    }

    fn origin(&self) -> Origin {
        self.origin()
    }
}
