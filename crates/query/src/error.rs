//! Query Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A query compilation error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for query operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// Every variant is raised before any file is touched: a query that fails to
/// compile never starts a scan.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The search text is empty or only whitespace. Ask for something to search for.
    #[display("search text is empty")]
    EmptyQuery,
    /// The regular expression derived from a wildcard query didn't compile.
    #[display("invalid search pattern: {_0}")]
    InvalidPattern(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
