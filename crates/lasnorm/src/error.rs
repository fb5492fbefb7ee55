//! Error types for the lasnorm library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for lasnorm operations.
#[derive(Debug, Error)]
pub enum LasNormError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed LAS content.
    #[error("LAS error at line {line}: {message}")]
    Las { line: usize, message: String },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Workbook could not be opened or read.
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    /// File format not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Empty file or no data to process.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// A named log is not loaded in the session.
    #[error("Log not loaded: {0}")]
    UnknownLog(String),

    /// Error writing a standardized log or archive.
    #[error("Export error: {0}")]
    Export(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Regex compilation error.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

impl LasNormError {
    /// Wrap an IO error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LasNormError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn las(line: usize, message: impl Into<String>) -> Self {
        LasNormError::Las {
            line,
            message: message.into(),
        }
    }
}

/// Result type alias for lasnorm operations.
pub type Result<T> = std::result::Result<T, LasNormError>;
