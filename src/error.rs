//! Error types for neo_approaches.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for neo_approaches operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building, linking or exporting close approaches.
#[derive(Error, Debug)]
pub enum Error {
    /// Calendar date not in the source data set format
    #[error("Invalid calendar date '{input}': {source}")]
    InvalidDate {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Numeric field that can't be read as a float
    #[error("Invalid value '{input}' for field '{field}': {source}")]
    InvalidNumber {
        field: &'static str,
        input: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    /// Close approach used before its NEO was resolved
    #[error("Close approach of '{0}' is not linked to a NearEarthObject")]
    UnlinkedApproach(String),

    /// Close approach linked a second time
    #[error("Close approach of '{0}' is already linked")]
    AlreadyLinked(String),

    /// Output extension is neither csv nor json
    #[error("Unsupported output format for '{}', expected a .csv or .json file", .0.display())]
    UnsupportedFormat(PathBuf),

    /// Column missing from a close approach data file
    #[error("Missing field '{0}' in close approach data")]
    MissingField(&'static str),

    /// I/O error (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reading or writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parsing or writing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid_number(
        field: &'static str,
        input: &str,
        source: std::num::ParseFloatError,
    ) -> Self {
        Error::InvalidNumber {
            field,
            input: input.to_string(),
            source,
        }
    }
}
