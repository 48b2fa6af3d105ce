//! Extraction Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// An extraction error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The bytes are not a document this extractor understands.
    #[display("invalid document: {_0}")]
    InvalidDocument(#[error(not(source))] String),
    /// The document was understood but its text could not be produced.
    #[display("text extraction failed")]
    Extraction,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Same bytes in, same failure out.
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kind_display() {
        assert_eq!(
            ErrorKind::InvalidDocument("missing xref table".to_string()).to_string(),
            "invalid document: missing xref table"
        );
        assert_eq!(ErrorKind::Extraction.to_string(), "text extraction failed");
    }

    #[test]
    fn error_kind_retryable() {
        assert!(!ErrorKind::Extraction.is_retryable());
        assert!(!ErrorKind::InvalidDocument(String::new()).is_retryable());
    }
}
