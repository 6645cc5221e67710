//! The owning wrapper around a JSON value tree.

use crate::access::Access;
use crate::error::Result;
use crate::mutate::Modify;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// Where a document's numbers came from, which decides how integer
/// accessors read them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// Decoded from JSON text. Numbers are literals: `int64` and `uint64`
    /// accept them only when the literal is an integer in range.
    Decoded,
    /// Built from Rust values. Integers convert with a range check and floats
    /// truncate toward zero.
    Native,
}

/// A JSON document that can be read and edited by path.
///
/// The document owns exactly one [`Value`]. Lookups through [`Access`] borrow
/// from it; edits through [`Modify`] change it in place.
///
/// Serializes and deserializes as its value, so a `Document` can sit inside
/// other serde types. A deserialized document counts as [`Origin::Decoded`].
/// Equality compares values only.
#[derive(Debug, Clone)]
pub struct Document {
    value: Value,
    origin: Origin,
}

impl Document {
    /// An empty object, `{}`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_value(value: Value) -> Self {
        Self::with_origin(value, Origin::Native)
    }

    pub(crate) fn with_origin(value: Value, origin: Origin) -> Self {
        Self { value, origin }
    }

    /// Build a document from any serializable structure, bypassing text.
    ///
    /// # Errors
    ///
    /// Fails when `data` cannot be represented as JSON (e.g. a map with
    /// non-string keys).
    pub fn from_serialize<T: Serialize + ?Sized>(data: &T) -> Result<Self> {
        Ok(Self::from_value(serde_json::to_value(data)?))
    }

    /// Convert the document into a typed structure.
    ///
    /// # Errors
    ///
    /// Fails when the value does not match `T`'s shape.
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(T::deserialize(&self.value)?)
    }

    pub fn as_value(&self) -> &Value {
        &self.value
    }

    pub fn as_value_mut(&mut self) -> &mut Value {
        &mut self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::from_value(Value::Object(Map::new()))
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Document {}

impl From<Value> for Document {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        doc.value
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Value::deserialize(deserializer).map(|value| Self::with_origin(value, Origin::Decoded))
    }
}

/// Compact JSON with object keys in sorted order.
impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

impl Access for Document {
    fn root(&self) -> &Value {
        &self.value
    }

    fn origin(&self) -> Origin {
        self.origin
    }
}

impl Modify for Document {
    fn root_mut(&mut self) -> &mut Value {
        &mut self.value
    }
}
