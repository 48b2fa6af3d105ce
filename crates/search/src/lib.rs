//! Incremental document search.
//!
//! A scan walks every configured root directory, reads each document it finds,
//! and hashes the bytes. Documents whose hash matches what the
//! [`DocumentCache`](sift_cache::DocumentCache) remembers are served from the
//! cache; everything else goes through the
//! [`ContentExtractor`](sift_extract::ContentExtractor). Every document's lines
//! are then tested against the compiled [`Matcher`](sift_query::Matcher) and
//! the matches are streamed out while the scan is still running.
//!
//! There are two ways to drive a scan:
//!
//! - [`ScanOrchestrator::scan`] returns a [`Stream`](futures::Stream) of
//!   [`ScanEvent`]s and runs wherever it is polled.
//! - [`ScanOrchestrator::spawn`] compiles the query, runs the scan on its own
//!   Tokio task and pushes every event to an [`Observer`]. The returned
//!   [`ScanHandle`] can cancel the scan or wait for its [`ScanSummary`].
//!
//! ```no_run
//! use sift_cache::DocumentCache;
//! use sift_extract::PlainTextExtractor;
//! use sift_query::SearchQuery;
//! use sift_search::{ScanConfiguration, ScanEvent, ScanOrchestrator};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let orchestrator = ScanOrchestrator::new(Arc::new(DocumentCache::new()), PlainTextExtractor);
//! let config = ScanConfiguration::new(["/home/me/receipts"]);
//! let (events, mut receiver) = tokio::sync::mpsc::unbounded_channel::<ScanEvent>();
//! let handle = orchestrator.spawn(&config, &SearchQuery::literal("MILK"), events)?;
//! while let Some(event) = receiver.recv().await {
//!     if let ScanEvent::Match { document, scanned } = event {
//!         println!("{scanned}: {}", document.path.display());
//!     }
//! }
//! let summary = handle.wait().await?;
//! println!("{} documents scanned", summary.total_scanned);
//! # Ok(())
//! # }
//! ```

mod config;
pub mod error;
mod models;
mod observer;
mod orchestrator;
mod scan;
mod walk;

pub use crate::config::ScanConfiguration;
pub use crate::models::{Document, MatchedLine, ScanEvent, ScanSummary};
pub use crate::observer::Observer;
pub use crate::orchestrator::{ScanHandle, ScanOrchestrator};
pub use crate::scan::ScanEffort;
pub use tokio_util::sync::CancellationToken;
