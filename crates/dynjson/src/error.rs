//! Error types for path resolution, coercion and document I/O.

use crate::path::{Path, Segment};
use thiserror::Error;

/// A path walk stopped before consuming every segment.
///
/// `found_path` is the longest prefix that resolved, `missing_path` the rest,
/// starting at the first segment that did not. Concatenated they give back the
/// path that was requested, with one exception: a failed [`del`] whose parent
/// could not be reached reports its final segment appended to `missing_path`.
///
/// [`del`]: crate::Modify::del
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("found: {found_path} missing: {missing_path}")]
pub struct PathError {
    found_path: Path,
    missing_path: Path,
}

impl PathError {
    /// Split `path` at the segment that failed to resolve.
    pub(crate) fn split(path: &[Segment], at: usize) -> Self {
        let (found, missing) = path.split_at(at);
        Self {
            found_path: Path::from(found),
            missing_path: Path::from(missing),
        }
    }

    pub(crate) fn push_missing(&mut self, segment: Segment) {
        self.missing_path.push(segment);
    }

    /// Prefix of the requested path that resolved successfully.
    pub fn found_path(&self) -> &Path {
        &self.found_path
    }

    /// Suffix of the requested path, starting at the first failing segment.
    pub fn missing_path(&self) -> &Path {
        &self.missing_path
    }
}

/// Errors returned by document navigation, coercion and I/O.
#[derive(Error, Debug)]
pub enum Error {
    /// The path did not resolve; see [`PathError`] for how far it got.
    #[error(transparent)]
    Path(#[from] PathError),

    /// The value exists but is not of the requested kind.
    #[error("type assertion to {expected} failed")]
    Type { expected: &'static str },

    /// A string value was found but could not be converted.
    #[error("cannot parse {input:?} as {target}: {source}")]
    Parse {
        input: String,
        target: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A number was found but does not fit the requested integer type.
    #[error("{value} is out of range for {target}")]
    Range { value: String, target: &'static str },

    /// The call itself was malformed (e.g. `set_parts` without a value).
    #[error("{0}")]
    Argument(&'static str),

    /// Decoding or encoding JSON failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading or writing the underlying file or stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn parse<E>(input: &str, target: &'static str, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Parse {
            input: input.to_string(),
            target,
            source: Box::new(source),
        }
    }

    /// The path error behind this error, if resolution is what failed.
    pub fn as_path_error(&self) -> Option<&PathError> {
        match self {
            Error::Path(err) => Some(err),
            _ => None,
        }
    }
}

/// Convenience alias used throughout dynjson.
pub type Result<T> = std::result::Result<T, Error>;
