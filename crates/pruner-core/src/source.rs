//! Readable inputs for tables and exclusion lists

use crate::error::{Error, Result};
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

/// A delimited text to parse, either on disk or held in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSource {
    /// A file on disk; its path doubles as the source identity
    File(PathBuf),
    /// Text pasted or piped in; `name` is only used in messages
    Text { text: String, name: Option<String> },
}

impl TableSource {
    pub fn file<P: Into<PathBuf>>(path: P) -> Self {
        TableSource::File(path.into())
    }

    pub fn text(text: impl Into<String>) -> Self {
        TableSource::Text {
            text: text.into(),
            name: None,
        }
    }

    pub fn named_text(text: impl Into<String>, name: impl Into<String>) -> Self {
        TableSource::Text {
            text: text.into(),
            name: Some(name.into()),
        }
    }

    /// File-system identity, if the source has one
    pub fn path(&self) -> Option<&Path> {
        match self {
            TableSource::File(path) => Some(path),
            TableSource::Text { .. } => None,
        }
    }

    /// Human-readable identity used in error messages and logs
    pub fn display_name(&self) -> String {
        match self {
            TableSource::File(path) => format!("'{}'", path.display()),
            TableSource::Text { name: Some(name), .. } => format!("'{}'", name),
            TableSource::Text { name: None, .. } => "input text".to_string(),
        }
    }

    /// Read the whole source as bytes
    pub fn read_bytes(&self) -> Result<Cow<'_, [u8]>> {
        match self {
            TableSource::File(path) => fs::read(path)
                .map(Cow::Owned)
                .map_err(|e| Error::UnreadableSource {
                    path: path.clone(),
                    source: e,
                }),
            TableSource::Text { text, .. } => Ok(Cow::Borrowed(text.as_bytes())),
        }
    }

    /// Read the whole source as text, replacing undecodable bytes with U+FFFD
    pub fn read_text(&self) -> Result<String> {
        let bytes = self.read_bytes()?;
        Ok(decode_lossy(&bytes, &self.display_name()))
    }
}

/// Decode bytes as UTF-8, substituting U+FFFD for invalid sequences
///
/// Legacy or corrupted encodings are not an error; a warning is logged and
/// processing continues with the replaced text.
pub fn decode_lossy(bytes: &[u8], source_name: &str) -> String {
    match String::from_utf8_lossy(bytes) {
        Cow::Borrowed(text) => text.to_string(),
        Cow::Owned(text) => {
            tracing::warn!(
                source = source_name,
                "Undecodable bytes replaced with U+FFFD"
            );
            text
        }
    }
}
