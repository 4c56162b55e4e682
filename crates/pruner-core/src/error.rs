//! Error types for pruner-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in pruner-core
#[derive(Debug, Error)]
pub enum Error {
    /// The pruning field is not a header of the parsed table
    #[error("{source_name} doesn't contain column '{field}'")]
    MissingColumn { field: String, source_name: String },

    /// A data row ends before the pruning field's position
    #[error("row {row} of {source_name} has no value for column '{field}'")]
    MissingField {
        field: String,
        row: usize,
        source_name: String,
    },

    /// Failed to open or read a source file
    #[error("failed to read '{path}': {source}")]
    UnreadableSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create or write a destination file
    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source has no header row to look columns up in
    #[error("{0} contains no header row")]
    EmptyTable(String),

    /// CSV error from the csv crate
    #[error("CSV error in {source_name}: {source}")]
    Csv {
        source_name: String,
        #[source]
        source: csv::Error,
    },

    /// A separator name or character could not be understood
    #[error("invalid separator '{0}': expected tab, comma, semicolon or a single ASCII character")]
    InvalidSeparator(String),

    /// Directory traversal error
    #[error("failed to traverse directory: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
