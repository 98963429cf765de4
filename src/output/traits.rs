//! Output traits and error types
//!
//! Every output file is a CSV with a fixed header. Row types describe their
//! own schema through [`TabularRecord`].

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to create output directory {path}: {source}")]
    CreateDir {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to create output file {path}: {source}")]
    CreateFile {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// A record that serializes to one CSV row under a fixed header
///
/// Serialization never fails: absent values become empty strings.
pub trait TabularRecord {
    /// Column names, in order
    const HEADER: &'static [&'static str];

    /// Field values, one per header column
    fn to_row(&self) -> Vec<String>;
}
