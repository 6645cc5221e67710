//! Path resolution over a `serde_json::Value` tree.
//!
//! Segments are consumed left to right. A key needs the current value to be an
//! object holding that key; an index needs an array with the index in
//! `[0, len)`. The first segment that does not resolve stops the walk and
//! becomes the head of the [`PathError`]'s missing path.
//!
//! Resolved values are handed out as borrowed views ([`Node`], [`NodeMut`])
//! into the owning document, never as copies: writes through a `NodeMut` land
//! in the document it was taken from.

use crate::document::{Document, Origin};
use crate::error::PathError;
use crate::path::Segment;
use serde_json::Value;
use std::fmt;

/// Resolve one segment against `value`.
fn step<'a>(value: &'a Value, segment: &Segment) -> Option<&'a Value> {
    match (segment, value) {
        (Segment::Key(key), Value::Object(map)) => map.get(key),
        (Segment::Index(index), Value::Array(items)) => {
            usize::try_from(*index).ok().and_then(|i| items.get(i))
        }
        _ => None,
    }
}

fn step_mut<'a>(value: &'a mut Value, segment: &Segment) -> Option<&'a mut Value> {
    match (segment, value) {
        (Segment::Key(key), Value::Object(map)) => map.get_mut(key),
        (Segment::Index(index), Value::Array(items)) => element_mut(items, *index),
        _ => None,
    }
}

/// Bounds-checked mutable access to an array slot.
pub(crate) fn element_mut(items: &mut [Value], index: i64) -> Option<&mut Value> {
    usize::try_from(index).ok().and_then(move |i| items.get_mut(i))
}

/// Walk `path` from `root`, returning the deepest value reached.
///
/// When the walk stops early the returned value is the one at the error's
/// `found_path`, i.e. the parent of the failing segment.
pub(crate) fn walk<'a>(root: &'a Value, path: &[Segment]) -> (&'a Value, Option<PathError>) {
    let mut current = root;
    for (i, segment) in path.iter().enumerate() {
        match step(current, segment) {
            Some(next) => current = next,
            None => return (current, Some(PathError::split(path, i))),
        }
    }
    (current, None)
}

pub(crate) fn walk_mut<'a>(
    root: &'a mut Value,
    path: &[Segment],
) -> Result<&'a mut Value, PathError> {
    let mut current = root;
    for (i, segment) in path.iter().enumerate() {
        current = match step_mut(current, segment) {
            Some(next) => next,
            None => return Err(PathError::split(path, i)),
        };
    }
    Ok(current)
}

/// A read-only view of a value inside a document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node<'a> {
    value: &'a Value,
    origin: Origin,
}

impl<'a> Node<'a> {
    pub(crate) fn new(value: &'a Value, origin: Origin) -> Self {
        Self { value, origin }
    }

    /// The origin of the document this view was taken from.
    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// The borrowed value, tied to the document rather than to this view.
    pub fn as_value(&self) -> &'a Value {
        self.value
    }

    /// Copy the viewed subtree into a standalone document.
    pub fn to_document(&self) -> Document {
        Document::with_origin(self.value.clone(), self.origin)
    }
}

/// Compact JSON, like [`Document`]'s `Display`.
impl fmt::Display for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.value, f)
    }
}

/// A mutable view of a value inside a document.
///
/// Obtained from [`Modify::get_mut`](crate::Modify::get_mut). `set` and `del`
/// on the view edit the parent document in place; deleting the view's own root
/// (an empty path) leaves `null` in its slot.
#[derive(Debug, PartialEq)]
pub struct NodeMut<'a> {
    value: &'a mut Value,
    origin: Origin,
}

impl<'a> NodeMut<'a> {
    pub(crate) fn new(value: &'a mut Value, origin: Origin) -> Self {
        Self { value, origin }
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn as_value(&self) -> &Value {
        &*self.value
    }

    pub fn as_value_mut(&mut self) -> &mut Value {
        &mut *self.value
    }

    /// Give up the view and keep the mutable borrow.
    pub fn into_value_mut(self) -> &'a mut Value {
        self.value
    }
}

impl fmt::Display for NodeMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.value, f)
    }
}
