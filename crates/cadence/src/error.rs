//! Error types for the cadence library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for cadence operations.
///
/// The validation engine itself never returns this type; it covers
/// ingestion, configuration and record persistence.
#[derive(Debug, Error)]
pub enum CadenceError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// File format not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// No columns or no lines to read.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Saving or loading a dataset record failed.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

/// Result type alias for cadence operations.
pub type Result<T> = std::result::Result<T, CadenceError>;
