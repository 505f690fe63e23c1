//! Error types for the xiphos library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`XiphosError`] enum.
//!
//! # Examples
//!
//! ```
//! use xiphos::error::{Result, XiphosError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(XiphosError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {e}"),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for xiphos operations.
#[derive(Error, Debug)]
pub enum XiphosError {
    /// I/O errors (file operations, archive writing, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Index-related errors
    #[error("Index error: {0}")]
    Index(String),

    /// Analysis-related errors (tokenization, stemming, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Query-related errors (construction, evaluation)
    #[error("Query error: {0}")]
    Query(String),

    /// Release bundling errors (archiving, checksumming, manifest)
    #[error("Bundle error: {0}")]
    Bundle(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with XiphosError.
pub type Result<T> = std::result::Result<T, XiphosError>;

impl XiphosError {
    /// Create a new index error.
    pub fn index<S: Into<String>>(msg: S) -> Self {
        XiphosError::Index(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        XiphosError::Analysis(msg.into())
    }

    /// Create a new query error.
    pub fn query<S: Into<String>>(msg: S) -> Self {
        XiphosError::Query(msg.into())
    }

    /// Create a new bundle error.
    pub fn bundle<S: Into<String>>(msg: S) -> Self {
        XiphosError::Bundle(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        XiphosError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        XiphosError::Other(format!("Not found: {}", msg.into()))
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        XiphosError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = XiphosError::index("Test index error");
        assert_eq!(error.to_string(), "Index error: Test index error");

        let error = XiphosError::analysis("Test analysis error");
        assert_eq!(error.to_string(), "Analysis error: Test analysis error");

        let error = XiphosError::bundle("zip failed");
        assert_eq!(error.to_string(), "Bundle error: zip failed");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = XiphosError::from(io_error);

        match error {
            XiphosError::Io(_) => {}
            _ => panic!("Expected IO error variant"),
        }
    }
}
