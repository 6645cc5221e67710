//! Path segments used to address values inside a document.
//!
//! A path is an ordered list of [`Segment`]s. Keys select object members,
//! indices select array elements. Anything else can still be placed in a path
//! (as [`Segment::Other`]) but never resolves, so the walk reports a
//! [`PathError`](crate::PathError) at that position.

use serde_json::Value;
use std::convert::Infallible;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

/// One step of a navigation path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Object member name.
    Key(String),
    /// Array position. Negative values are representable but never in bounds.
    Index(i64),
    /// A segment that is neither a key nor an index.
    Other(Value),
}

impl Segment {
    pub fn is_key(&self) -> bool {
        matches!(self, Segment::Key(_))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => f.write_str(key),
            Segment::Index(index) => write!(f, "{index}"),
            Segment::Other(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for Segment {
    fn from(key: &str) -> Self {
        Segment::Key(key.to_string())
    }
}

impl From<String> for Segment {
    fn from(key: String) -> Self {
        Segment::Key(key)
    }
}

impl From<&String> for Segment {
    fn from(key: &String) -> Self {
        Segment::Key(key.clone())
    }
}

macro_rules! index_from {
    ($($int:ty),*) => {
        $(
            impl From<$int> for Segment {
                fn from(index: $int) -> Self {
                    Segment::Index(i64::from(index))
                }
            }
        )*
    };
}

index_from!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! index_try_from {
    ($($int:ty),*) => {
        $(
            impl From<$int> for Segment {
                fn from(index: $int) -> Self {
                    match i64::try_from(index) {
                        Ok(index) => Segment::Index(index),
                        Err(_) => Segment::Other(Value::from(index)),
                    }
                }
            }
        )*
    };
}

index_try_from!(u64, usize, isize);

impl From<bool> for Segment {
    fn from(value: bool) -> Self {
        Segment::Other(Value::Bool(value))
    }
}

impl From<f64> for Segment {
    fn from(value: f64) -> Self {
        Segment::Other(Value::from(value))
    }
}

/// Strings become keys and integral numbers become indices; every other
/// value (floats included) is kept as [`Segment::Other`].
impl From<Value> for Segment {
    fn from(value: Value) -> Self {
        match value {
            Value::String(key) => Segment::Key(key),
            Value::Number(n) => match n.as_i64() {
                Some(index) => Segment::Index(index),
                None => Segment::Other(Value::Number(n)),
            },
            other => Segment::Other(other),
        }
    }
}

/// Parses a command-line style segment: anything that reads as an integer
/// is an index, everything else is a key.
impl FromStr for Segment {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<i64>() {
            Ok(index) => Segment::Index(index),
            Err(_) => Segment::Key(s.to_string()),
        })
    }
}

/// An owned navigation path.
///
/// Dereferences to `[Segment]`, so a `&Path` can be passed wherever a path
/// slice is expected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path(Vec<Segment>);

impl Path {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, segment: impl Into<Segment>) {
        self.0.push(segment.into());
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    pub fn into_segments(self) -> Vec<Segment> {
        self.0
    }
}

impl Deref for Path {
    type Target = [Segment];

    fn deref(&self) -> &[Segment] {
        &self.0
    }
}

impl AsRef<[Segment]> for Path {
    fn as_ref(&self) -> &[Segment] {
        &self.0
    }
}

impl From<Vec<Segment>> for Path {
    fn from(segments: Vec<Segment>) -> Self {
        Self(segments)
    }
}

impl From<&[Segment]> for Path {
    fn from(segments: &[Segment]) -> Self {
        Self(segments.to_vec())
    }
}

impl<S: Into<Segment>> FromIterator<S> for Path {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Formats as `[a 1 b]`.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{segment}")?;
        }
        f.write_str("]")
    }
}

/// Build a path as an array of [`Segment`]s.
///
/// ```
/// use dynjson::{path, Segment};
///
/// let p = path!["items", 2, "name"];
/// assert_eq!(p[1], Segment::Index(2));
/// ```
#[macro_export]
macro_rules! path {
    () => {{
        let empty: [$crate::Segment; 0] = [];
        empty
    }};
    ($($segment:expr),+ $(,)?) => {
        [$($crate::Segment::from($segment)),+]
    };
}
