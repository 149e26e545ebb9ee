//! Error types for txweb-data

use thiserror::Error;

/// Errors raised while loading or decoding a dataset
#[derive(Error, Debug)]
pub enum DataError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid JSON in {location}: {message}")]
    InvalidJson { location: String, message: String },
}

/// Result type with DataError
pub type DataResult<T> = Result<T, DataError>;

// ==================== Tests ====================
