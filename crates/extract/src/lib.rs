//! Text extraction for searchable documents.
//!
//! The scanner only ever talks to the [`ContentExtractor`] contract: hand it
//! the raw bytes of a document, get back the document's text as an ordered
//! list of non-empty lines. How those lines are produced (decoding plain
//! text, walking PDF content streams, ...) is entirely up to the extractor.
//!
//! Extractors receive bytes rather than a path on purpose: the caller has
//! already read the file to hash it, and extracting from that same buffer
//! guarantees the cached lines belong to the cached hash.

pub mod error;
mod lines;
#[cfg(feature = "pdf")]
mod pdf;
mod text;

use std::sync::Arc;
use tracing::instrument;

use crate::error::Result;
pub use crate::lines::split_lines;
#[cfg(feature = "pdf")]
pub use crate::pdf::PdfExtractor;
pub use crate::text::PlainTextExtractor;

/// Ordered lines of text extracted from one document.
pub type Lines = Vec<String>;

/// Turns the bytes of a document into its lines of text.
///
/// Implementations must be deterministic for the same input, otherwise the
/// content-hash cache sitting in front of them would serve stale lines.
/// Extraction runs on a blocking worker thread, so implementations are free to
/// be CPU heavy.
pub trait ContentExtractor: Send + Sync {
    /// Extracts the ordered lines of text from the raw document bytes.
    ///
    /// # Errors
    /// Returns [`ErrorKind::InvalidDocument`](crate::error::ErrorKind::InvalidDocument)
    /// when the bytes cannot be understood by this extractor.
    fn extract(&self, content: &[u8]) -> Result<Lines>;
}

impl<E: ContentExtractor + ?Sized> ContentExtractor for Arc<E> {
    fn extract(&self, content: &[u8]) -> Result<Lines> {
        (**self).extract(content)
    }
}

impl<E: ContentExtractor + ?Sized> ContentExtractor for Box<E> {
    fn extract(&self, content: &[u8]) -> Result<Lines> {
        (**self).extract(content)
    }
}

/// Easy, top-level entrypoint for running an extractor with tracing attached.
#[instrument(skip_all, fields(content_size = content.len(), lines))]
pub fn extract(extractor: &dyn ContentExtractor, content: &[u8]) -> Result<Lines> {
    let lines = extractor.extract(content)?;
    tracing::Span::current().record("lines", lines.len());
    Ok(lines)
}
