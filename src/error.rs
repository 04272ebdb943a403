//! Error types for the Kestrel library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`KestrelError`] enum. Empty expansions and empty result lists are not
//! errors; they are ordinary outcomes of a search.
//!
//! # Examples
//!
//! ```
//! use kestrel::error::{KestrelError, Result};
//!
//! fn validate(reference: &str) -> Result<()> {
//!     if reference.is_empty() {
//!         return Err(KestrelError::invalid_document("empty reference"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate("").is_err());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Kestrel operations.
#[derive(Error, Debug)]
pub enum KestrelError {
    /// Malformed query syntax or a reference to a field that is not indexed.
    #[error("Query parse error: {message} (at `{fragment}`)")]
    QueryParse {
        /// What went wrong.
        message: String,
        /// The part of the query that triggered the error.
        fragment: String,
    },

    /// Two documents share the same reference.
    #[error("Duplicate document reference: {0}")]
    DuplicateReference(String),

    /// A field configured as required has no text in a document.
    #[error("Document `{reference}` is missing required field `{field}`")]
    MissingField { reference: String, field: String },

    /// A document violates the input contract (e.g. has no reference).
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// The index configuration is unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Analysis-related errors (tokenizer construction, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// A snapshot could not be turned back into an index.
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    /// I/O errors (snapshot files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary snapshot encoding errors
    #[error("Binary encoding error: {0}")]
    Bincode(#[from] bincode::Error),
}

/// Result type alias for operations that may fail with KestrelError.
pub type Result<T> = std::result::Result<T, KestrelError>;

impl KestrelError {
    /// Create a new query parse error for the given query fragment.
    pub fn query_parse<S: Into<String>, F: Into<String>>(message: S, fragment: F) -> Self {
        KestrelError::QueryParse {
            message: message.into(),
            fragment: fragment.into(),
        }
    }

    /// Create a new invalid document error.
    pub fn invalid_document<S: Into<String>>(msg: S) -> Self {
        KestrelError::InvalidDocument(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        KestrelError::InvalidConfig(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        KestrelError::Analysis(msg.into())
    }

    /// Create a new snapshot error.
    pub fn snapshot<S: Into<String>>(msg: S) -> Self {
        KestrelError::Snapshot(msg.into())
    }

    /// Whether this error was raised while parsing a query.
    pub fn is_query_parse(&self) -> bool {
        matches!(self, KestrelError::QueryParse { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = KestrelError::query_parse("unknown field", "colour:red");
        assert_eq!(
            error.to_string(),
            "Query parse error: unknown field (at `colour:red`)"
        );
        assert!(error.is_query_parse());

        let error = KestrelError::DuplicateReference("a".to_string());
        assert_eq!(error.to_string(), "Duplicate document reference: a");
        assert!(!error.is_query_parse());

        let error = KestrelError::analysis("bad pattern");
        assert_eq!(error.to_string(), "Analysis error: bad pattern");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let kestrel_error = KestrelError::from(io_error);

        match kestrel_error {
            KestrelError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
