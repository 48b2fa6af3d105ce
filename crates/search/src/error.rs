//! Search Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.
//!
//! Only two things stop a scan from being started or finished: a query that
//! doesn't compile, and a worker task that dies. Everything that goes wrong
//! *during* a scan (a root that doesn't exist, a document that can't be read
//! or extracted) is recovered and reported through the scan's events instead.

use derive_more::{Display, Error};
use sift_query::error::{Error as QueryError, ErrorKind as QueryErrorKind};
use std::fmt;
use std::io::{Error as IoError, ErrorKind as IoErrorKind};
use std::path::PathBuf;

/// A search error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The search query was rejected; no scan was started.
    #[display("search query rejected: {_0}")]
    Query(QueryErrorKind),
    /// The background scan task panicked or was aborted before finishing.
    #[display("scan worker stopped unexpectedly")]
    Worker,
}
impl ErrorKind {
    /// Convert a query error into a search error, preserving the query
    /// crate's `Exn` frame as a child in its own error tree.
    #[track_caller]
    pub fn query(err: QueryError) -> Error {
        let inner = (*err).clone();
        err.raise(ErrorKind::Query(inner))
    }

    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Worker)
    }
}

/// Why a directory couldn't be listed.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum EnumerationErrorKind {
    #[display("directory not found")]
    NotFound,
    #[display("permission denied")]
    PermissionDenied,
    #[display("not a directory")]
    NotADirectory,
    #[display("I/O error: {_0}")]
    Io(#[error(not(source))] String),
}
impl From<&IoError> for EnumerationErrorKind {
    fn from(err: &IoError) -> Self {
        match err.kind() {
            IoErrorKind::NotFound => Self::NotFound,
            IoErrorKind::PermissionDenied => Self::PermissionDenied,
            IoErrorKind::NotADirectory => Self::NotADirectory,
            _ => Self::Io(err.to_string()),
        }
    }
}

/// A directory that couldn't be listed during a scan.
///
/// The rest of the scan carries on without it: other roots, and the other
/// directories under the same root, are still searched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumerationFailure {
    /// The configured root being walked.
    pub root: PathBuf,
    /// The directory that failed. Equal to `root` when the root itself failed.
    pub directory: PathBuf,
    pub kind: EnumerationErrorKind,
}
impl EnumerationFailure {
    pub fn new(root: impl Into<PathBuf>, directory: impl Into<PathBuf>, kind: EnumerationErrorKind) -> Self {
        Self {
            root: root.into(),
            directory: directory.into(),
            kind,
        }
    }

    /// Returns `true` if the configured root itself couldn't be listed.
    pub fn is_root(&self) -> bool {
        self.root == self.directory
    }
}
impl fmt::Display for EnumerationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.directory.display(), self.kind)
    }
}
