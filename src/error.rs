//! Error types for beauty-reader
//!
//! This module provides the error type shared by the stores, the text
//! extraction adapter and the reader controller.

use thiserror::Error;

/// Main error type for reader operations
#[derive(Error, Debug)]
pub enum ReaderError {
    /// PDF parsing/extraction errors
    #[error("PDF processing error: {0}")]
    Pdf(String),

    /// History or preference storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// SQLite database errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A background task panicked or was aborted
    #[error("Background task error: {0}")]
    Task(String),

    /// Generic errors
    #[error("Generic error: {0}")]
    Generic(String),
}

/// Result type alias for reader operations
pub type Result<T> = std::result::Result<T, ReaderError>;

impl From<lopdf::Error> for ReaderError {
    fn from(err: lopdf::Error) -> Self {
        ReaderError::Pdf(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ReaderError {
    fn from(err: tokio::task::JoinError) -> Self {
        ReaderError::Task(err.to_string())
    }
}

impl From<anyhow::Error> for ReaderError {
    fn from(err: anyhow::Error) -> Self {
        ReaderError::Generic(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = ReaderError::Pdf("no pages".to_string());
        assert_eq!(error.to_string(), "PDF processing error: no pages");
    }

    #[test]
    fn test_error_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let reader_error = ReaderError::from(io_error);

        match reader_error {
            ReaderError::Io(_) => (),
            _ => panic!("Expected Io error"),
        }
    }
}
