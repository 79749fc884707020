//! Error types for the treasury ledger pipeline.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the treasury ledger pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// Registry error (malformed or inconsistent reference table).
    #[error("Registry error: {0}")]
    Registry(String),

    /// Data error (invalid or missing data in an export).
    #[error("Data error: {0}")]
    Data(String),

    /// A required column is absent from an export file.
    #[error("Missing column {column:?} in {file}")]
    MissingColumn { file: String, column: &'static str },

    /// An unparsable date cell; unlike numeric cells these abort the wallet.
    #[error("Invalid date: {0:?}")]
    InvalidDate(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a registry error.
    pub fn registry(msg: impl Into<String>) -> Self {
        Error::Registry(msg.into())
    }

    /// Create a data error.
    pub fn data(msg: impl Into<String>) -> Self {
        Error::Data(msg.into())
    }

    /// Create a missing-column error.
    pub fn missing_column(file: impl Into<String>, column: &'static str) -> Self {
        Error::MissingColumn { file: file.into(), column }
    }
}
