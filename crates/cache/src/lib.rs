//! In-memory cache of extracted document text.
//!
//! Extracting text from a document is by far the most expensive step of a
//! scan, so this crate remembers what each document said the last time it was
//! read. The cache is not a source of truth - the files are. It lives for the
//! lifetime of the process and is never written to disk.
//!
//! # Architecture
//! - **ContentHash**: BLAKE3 hash of a file's complete bytes. Only used to
//!   detect change, never as a security property.
//! - **DocumentRecord**: what is known about one path: the hash of the bytes
//!   it was last extracted from, and the lines that extraction produced.
//! - **DocumentCache**: the path-keyed registry of records. Owned by whoever
//!   orchestrates scans and shared via `Arc`; there is no global instance.

mod models;
mod repo;

pub use crate::models::{ContentHash, DocumentRecord, file_name};
pub use crate::repo::DocumentCache;
