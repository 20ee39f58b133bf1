//! Error types for roster-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in roster-core
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to open or read a source file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create or write a destination file
    #[error("failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV tokenizer error from the csv crate
    #[error("CSV error in '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Source has no rows, not even a header
    #[error("missing header row in '{path}'")]
    MissingHeader { path: PathBuf },

    /// First field of a row is not an integer key
    #[error("invalid key '{value}' on line {line} of '{path}'")]
    InvalidKey {
        path: PathBuf,
        line: u64,
        value: String,
    },

    /// List row without enough columns to build a record
    #[error("row {id} in '{path}' has {found} fields, expected at least {expected}")]
    ShortRow {
        path: PathBuf,
        id: i64,
        expected: usize,
        found: usize,
    },

    /// No record with this key
    #[error("student {0} does not exist")]
    RecordNotFound(i64),

    /// Field name is not one of the record attributes
    #[error("invalid field: {0}")]
    InvalidField(String),

    /// Malformed command-line edit shorthand
    #[error("invalid edit '{0}', expected 'id:field:value'")]
    InvalidEdit(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
