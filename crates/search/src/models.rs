use crate::error::EnumerationFailure;
use crate::scan::ScanEffort;
use sift_cache::ContentHash;
use std::path::PathBuf;

/// The first line of a document that satisfied the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedLine {
    /// Zero-based position among the document's extracted lines.
    pub index: usize,
    pub text: String,
}

/// A document that matched the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub path: PathBuf,
    /// File name, for display.
    pub name: String,
    pub content_hash: Option<ContentHash>,
    pub matched: MatchedLine,
}

/// Something that happened during a scan, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    /// A document matched. `scanned` is how many documents the scan had
    /// finished with, this one included.
    Match { document: Document, scanned: u64 },
    /// A root (or a directory beneath it) couldn't be listed. The scan carries on.
    RootFailed(EnumerationFailure),
    /// The scan is over. Always the last event, and always sent exactly once.
    Completed(ScanSummary),
}

/// What a finished (or cancelled) scan did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Documents the scan finished with, whether or not they matched.
    pub total_scanned: u64,
    pub matched: u64,
    /// Documents served from the cache.
    pub cache_hits: u64,
    /// Documents that went through the extractor successfully.
    pub extracted: u64,
    /// Documents that disappeared or couldn't be read after being listed.
    pub unreadable: u64,
    /// Documents the extractor rejected.
    pub extraction_failures: u64,
    /// Directories that couldn't be listed.
    pub failures: Vec<EnumerationFailure>,
    /// The scan stopped early because it was cancelled.
    pub cancelled: bool,
}
impl ScanSummary {
    pub(crate) fn record(&mut self, effort: ScanEffort) {
        self.total_scanned += 1;
        match effort {
            ScanEffort::Cached => self.cache_hits += 1,
            ScanEffort::Processed | ScanEffort::Recalculated => self.extracted += 1,
            ScanEffort::Unreadable => self.unreadable += 1,
            ScanEffort::Failed => self.extraction_failures += 1,
        }
    }

    /// Returns `true` if some directories were skipped because they couldn't be listed.
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }
}
