//! Decoding documents from text, bytes, streams and files, and encoding them
//! back.
//!
//! Numbers decode into `serde_json::Number`, which keeps integers exact rather
//! than routing everything through `f64`, and decoded documents are marked
//! [`Origin::Decoded`] so integer accessors read numbers as literals. Compact
//! output sorts object keys; pretty output indents by two spaces.

use crate::document::{Document, Origin};
use crate::error::{Error, Result};
use serde_json::Value;
use std::fs;
use std::io::{Cursor, Read, Write};
use std::path::Path;
use std::str::FromStr;

impl Document {
    /// Decode a document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if `json` is not a single valid JSON value.
    pub fn parse(json: &str) -> Result<Self> {
        Self::from_slice(json.as_bytes())
    }

    /// Decode a document from JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if `bytes` are not a single valid JSON value.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(bytes)?;
        tracing::trace!(len = bytes.len(), "decoded document");
        Ok(Self::with_origin(value, Origin::Decoded))
    }

    /// Decode a document from a stream, reading it to the end.
    ///
    /// A missing stream, or one that yields nothing but whitespace, decodes
    /// as `null`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if reading fails and [`Error::Json`] if the
    /// content is not valid JSON.
    pub fn from_reader<R: Read>(reader: Option<R>) -> Result<Self> {
        let Some(mut reader) = reader else {
            return Ok(Self::with_origin(Value::Null, Origin::Decoded));
        };
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        if buf.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::with_origin(Value::Null, Origin::Decoded));
        }
        Self::from_slice(&buf)
    }

    /// Decode the whole content of `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read (a missing file keeps
    /// its `NotFound` kind) and [`Error::Json`] if it is not valid JSON.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::trace!(path = %path.display(), "reading document");
        let bytes = fs::read(path)?;
        Self::from_slice(&bytes)
    }

    /// Indented JSON, two spaces per level.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if serialization fails.
    pub fn to_string_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self.as_value())?)
    }

    /// Compact JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if serialization fails.
    pub fn to_vec(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self.as_value())?)
    }

    /// Indented JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if serialization fails.
    pub fn to_vec_pretty(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self.as_value())?)
    }

    /// Write compact JSON to `writer`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if serialization or the underlying write fails.
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<()> {
        Ok(serde_json::to_writer(writer, self.as_value())?)
    }

    /// Write indented JSON to `writer`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if serialization or the underlying write fails.
    pub fn to_writer_pretty<W: Write>(&self, writer: W) -> Result<()> {
        Ok(serde_json::to_writer_pretty(writer, self.as_value())?)
    }

    /// The compact encoding behind an in-memory reader.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if serialization fails.
    pub fn to_reader(&self) -> Result<impl Read> {
        Ok(Cursor::new(self.to_vec()?))
    }

    /// Replace the content of `path` with the compact encoding.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be written.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        tracing::trace!(path = %path.display(), "writing document");
        fs::write(path, self.to_vec()?)?;
        Ok(())
    }
}

impl FromStr for Document {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
