//! # dynjson
//!
//! Dynamically-typed JSON documents: navigate, edit and extract typed values by
//! path, without declaring a schema first.
//!
//! A path is a list of [`Segment`]s, each either an object key or an array
//! index. [`Access`] resolves paths and coerces what it finds (numbers across
//! integer/float/string forms, RFC 3339 times, duration literals, and arrays of
//! all of these). [`Modify`] writes and deletes along paths, creating missing
//! objects on the way.
//!
//! ## Quick start
//!
//! ```rust
//! use dynjson::{path, Access, Document, Modify};
//!
//! let mut doc: Document = r#"{"a":[{},{"b":[[],{},{"c":"got it!"}]}]}"#.parse().unwrap();
//! assert_eq!(doc.string(&path!["a", 1, "b", 2, "c"]).unwrap(), "got it!");
//!
//! // Lookups that fall short report how far they got.
//! let err = doc.get(&path!["a", 1, "b", 2, "d"]).unwrap_err();
//! assert_eq!(err.to_string(), "found: [a 1 b 2] missing: [d]");
//!
//! doc.set(&path!["x", "y", "z"], true).unwrap();
//! assert!(doc.bool_or(false, &path!["x", "y", "z"]));
//!
//! doc.del(&path!["a", 0]).unwrap();
//! assert_eq!(doc.to_string(), r#"{"a":[{"b":[[],{},{"c":"got it!"}]}],"x":{"y":{"z":true}}}"#);
//! ```
//!
//! ## Modules
//!
//! - [`document`]: the owning [`Document`]
//! - [`path`]: [`Segment`], [`Path`] and the [`path!`] macro
//! - [`access`]: lookups and typed coercion ([`Access`], [`Must`])
//! - [`mutate`]: `set` / `del` ([`Modify`], [`MustMut`])
//! - [`navigate`]: borrowed views ([`Node`], [`NodeMut`])
//! - [`duration`]: duration literals such as `"1h30m"` or `"-1.5s"`
//! - [`error`]: [`PathError`] and [`Error`]
//! - [`io`]: decoding from and encoding to text, streams and files

pub mod access;
mod coerce;
pub mod document;
pub mod duration;
pub mod error;
pub mod io;
pub mod mutate;
pub mod navigate;
pub mod path;

pub use access::{Access, Must};
pub use document::{Document, Origin};
pub use duration::DurationError;
pub use error::{Error, PathError, Result};
pub use mutate::{Modify, MustMut};
pub use navigate::{Node, NodeMut};
pub use path::{Path, Segment};

/// Traits needed to call accessors and mutators as methods.
pub mod prelude {
    pub use crate::access::Access;
    pub use crate::mutate::Modify;
}
