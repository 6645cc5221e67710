//! In-place writes and deletions along a path.
//!
//! `set` creates missing objects only along chains of keys: an absent key
//! followed by another key gets an empty object, an absent key followed by an
//! index is an error. Arrays are never created or grown; an index must already
//! be in bounds.

use crate::access::{or_panic, Access};
use crate::error::{Error, PathError, Result};
use crate::navigate::{self, NodeMut};
use crate::path::Segment;
use serde_json::map::Entry;
use serde_json::{Map, Value};

pub(crate) fn set_at(
    root: &mut Value,
    path: &[Segment],
    value: Value,
) -> std::result::Result<(), PathError> {
    let Some((last, parents)) = path.split_last() else {
        *root = value;
        return Ok(());
    };

    let mut current = root;
    for (i, segment) in parents.iter().enumerate() {
        let next_is_key = path[i + 1].is_key();
        current = match (segment, current) {
            (Segment::Key(key), Value::Object(map)) => match map.entry(key.as_str()) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) if next_is_key => entry.insert(Value::Object(Map::new())),
                Entry::Vacant(_) => return Err(PathError::split(path, i)),
            },
            (Segment::Index(index), Value::Array(items)) => {
                match navigate::element_mut(items, *index) {
                    Some(item) => item,
                    None => return Err(PathError::split(path, i)),
                }
            }
            _ => return Err(PathError::split(path, i)),
        };
    }

    match (last, current) {
        (Segment::Key(key), Value::Object(map)) => {
            map.insert(key.clone(), value);
            Ok(())
        }
        (Segment::Index(index), Value::Array(items)) => {
            match navigate::element_mut(items, *index) {
                Some(item) => {
                    *item = value;
                    Ok(())
                }
                None => Err(PathError::split(path, parents.len())),
            }
        }
        _ => Err(PathError::split(path, parents.len())),
    }
}

pub(crate) fn del_at(root: &mut Value, path: &[Segment]) -> std::result::Result<(), PathError> {
    let Some((last, parents)) = path.split_last() else {
        *root = Value::Null;
        return Ok(());
    };

    let parent = navigate::walk_mut(root, parents).map_err(|mut err| {
        err.push_missing(last.clone());
        err
    })?;

    let removed = match (last, parent) {
        // An absent key is already deleted.
        (Segment::Key(key), Value::Object(map)) => {
            map.remove(key);
            true
        }
        (Segment::Index(index), Value::Array(items)) => match usize::try_from(*index) {
            Ok(i) if i < items.len() => {
                items.remove(i);
                true
            }
            _ => false,
        },
        _ => false,
    };

    if removed {
        Ok(())
    } else {
        Err(PathError::split(path, parents.len()))
    }
}

/// Split variadic-style arguments into a path and the trailing value.
fn split_parts(parts: impl IntoIterator<Item = Value>) -> Result<(Vec<Segment>, Value)> {
    let mut parts: Vec<Value> = parts.into_iter().collect();
    let value = parts.pop().ok_or(Error::Argument("no value supplied"))?;
    Ok((parts.into_iter().map(Segment::from).collect(), value))
}

fn log_failure(op: &'static str, err: &PathError) {
    tracing::debug!(
        op,
        found = %err.found_path(),
        missing = %err.missing_path(),
        "path mutation failed"
    );
}

/// In-place mutation along a path.
///
/// Implemented by [`Document`](crate::Document) and [`NodeMut`]; a `NodeMut`
/// writes straight into the document it was borrowed from.
pub trait Modify: Access {
    /// The value every path starts from, mutably.
    fn root_mut(&mut self) -> &mut Value;

    /// Resolve `path` to a mutable view.
    ///
    /// # Errors
    ///
    /// Returns a [`PathError`] splitting `path` at the first segment that does
    /// not resolve.
    fn get_mut(&mut self, path: &[Segment]) -> std::result::Result<NodeMut<'_>, PathError> {
        let origin = self.origin();
        navigate::walk_mut(self.root_mut(), path).map(|value| NodeMut::new(value, origin))
    }

    /// Write `value` at `path`, replacing the root when `path` is empty.
    ///
    /// Missing keys are created as empty objects when the next segment is
    /// also a key. A key that exists is always descended into, even when it
    /// holds `null`.
    ///
    /// # Errors
    ///
    /// Returns a [`PathError`] at the first segment that cannot be walked or
    /// written: wrong container kind, out-of-bounds index, an absent key
    /// followed by an index, or a segment that is neither key nor index.
    fn set(
        &mut self,
        path: &[Segment],
        value: impl Into<Value>,
    ) -> std::result::Result<(), PathError>
    where
        Self: Sized,
    {
        set_at(self.root_mut(), path, value.into()).inspect_err(|err| log_failure("set", err))
    }

    /// Variadic form of [`set`](Modify::set): the last part is the value and
    /// the preceding parts form the path (strings are keys, integers indices).
    ///
    /// # Errors
    ///
    /// [`Error::Argument`] when `parts` is empty, [`Error::Path`] when the
    /// path cannot be written.
    fn set_parts(&mut self, parts: impl IntoIterator<Item = Value>) -> Result<()>
    where
        Self: Sized,
    {
        let (path, value) = split_parts(parts)?;
        self.set(&path, value)?;
        Ok(())
    }

    /// Remove the value addressed by the last segment of `path` from its
    /// parent. An empty path sets the root to `null`.
    ///
    /// Removing an array element shifts the later elements down. Removing an
    /// absent object key succeeds without changing anything.
    ///
    /// # Errors
    ///
    /// If the parent cannot be reached, the resolution error is returned with
    /// the last segment appended to its missing path. If the parent is the
    /// wrong kind of container, or the index is out of bounds, the error
    /// splits `path` at its last segment.
    fn del(&mut self, path: &[Segment]) -> std::result::Result<(), PathError> {
        del_at(self.root_mut(), path).inspect_err(|err| log_failure("del", err))
    }

    /// Panicking mutators, chainable.
    fn must_mut(&mut self) -> MustMut<'_, Self>
    where
        Self: Sized,
    {
        MustMut(self)
    }
}

/// Mutators that panic instead of returning an error.
///
/// ```
/// use dynjson::{path, Document, Modify};
///
/// let mut doc = Document::new();
/// doc.must_mut()
///     .set(&path!["server", "host"], "localhost")
///     .set(&path!["server", "port"], 8080);
/// assert_eq!(doc.to_string(), r#"{"server":{"host":"localhost","port":8080}}"#);
/// ```
#[derive(Debug)]
pub struct MustMut<'a, M>(&'a mut M);

impl<M: Modify> MustMut<'_, M> {
    #[track_caller]
    pub fn set(&mut self, path: &[Segment], value: impl Into<Value>) -> &mut Self {
        or_panic(self.0.set(path, value));
        self
    }

    #[track_caller]
    pub fn set_parts(&mut self, parts: impl IntoIterator<Item = Value>) -> &mut Self {
        or_panic(self.0.set_parts(parts));
        self
    }

    #[track_caller]
    pub fn del(&mut self, path: &[Segment]) -> &mut Self {
        or_panic(self.0.del(path));
        self
    }

    #[track_caller]
    pub fn get_mut(&mut self, path: &[Segment]) -> NodeMut<'_> {
        or_panic(self.0.get_mut(path))
    }
}

impl Modify for NodeMut<'_> {
    fn root_mut(&mut self) -> &mut Value {
        self.as_value_mut()
    }
}
