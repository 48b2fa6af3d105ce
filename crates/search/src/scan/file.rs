use sift_cache::{ContentHash, DocumentCache};
use sift_extract::ContentExtractor;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tokio::task;

/// Indicates how much work was required to produce the lines of a [`Scan`].
///
/// Distinguishes between cache hits and actual extraction work, which is
/// useful for progress reporting and performance analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanEffort {
    /// The content hash matched the cached record, so its lines were reused
    /// without running the extractor.
    Cached,
    /// The cache already held lines for this path but they couldn't be used
    /// (the content changed, or caching is switched off), so the document was
    /// extracted again.
    Recalculated,
    /// Nothing was cached for this path; the document was extracted for the
    /// first time.
    Processed,
    /// The document vanished or couldn't be read after it was listed. It has
    /// no lines and can't match.
    Unreadable,
    /// The extractor rejected the document (or panicked). It has no lines and
    /// can't match, and nothing is cached for it.
    Failed,
}

/// The result of scanning a single document.
#[derive(Debug)]
pub(crate) struct Scan {
    pub path: PathBuf,
    pub content_hash: Option<ContentHash>,
    pub lines: Arc<[String]>,
    pub effort: ScanEffort,
}
impl Scan {
    fn empty(path: PathBuf, content_hash: Option<ContentHash>, effort: ScanEffort) -> Self {
        Self {
            path,
            content_hash,
            lines: Arc::from(Vec::new()),
            effort,
        }
    }
}

/// Scans a single document, returning cached lines when they're still valid.
///
/// 1. The path is registered with the cache if it has never been seen.
/// 2. The bytes are read and hashed. A document that can't be read is
///    [`ScanEffort::Unreadable`]; the scan carries on.
/// 3. If the cached lines were extracted from identical bytes (and caching is
///    on) they are reused.
/// 4. Otherwise the extractor runs on a blocking worker. Successful results
///    are stored when caching is on; failures are never stored, so the next
///    scan tries again.
pub(crate) async fn scan_file(
    cache: &DocumentCache,
    extractor: &Arc<dyn ContentExtractor>,
    path: PathBuf,
    caching: bool,
) -> Scan {
    let record = cache.lookup_or_register(&path).await;
    // The entire document is held in memory until extraction finishes.
    let bytes = match fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "Document could not be read; treating it as empty");
            return Scan::empty(path, None, ScanEffort::Unreadable);
        },
    };
    let content_hash = ContentHash::of(&bytes);
    if DocumentCache::is_valid(&record, &content_hash, caching)
        && let Some(lines) = &record.lines
    {
        tracing::trace!(path = %path.display(), hash = %content_hash, "Serving document from cache");
        let lines = Arc::clone(lines);
        return Scan {
            path,
            content_hash: Some(content_hash),
            lines,
            effort: ScanEffort::Cached,
        };
    }
    let effort = if record.is_populated() {
        ScanEffort::Recalculated
    } else {
        ScanEffort::Processed
    };

    let worker = Arc::clone(extractor);
    let extracted = task::spawn_blocking(move || sift_extract::extract(&*worker, &bytes)).await;
    let lines: Arc<[String]> = match extracted {
        Ok(Ok(lines)) => lines.into(),
        Ok(Err(err)) => {
            tracing::warn!(path = %path.display(), error = ?err, "Extraction failed; document will not match");
            return Scan::empty(path, Some(content_hash), ScanEffort::Failed);
        },
        Err(err) => {
            tracing::error!(path = %path.display(), error = %err, "Extractor panicked; document will not match");
            return Scan::empty(path, Some(content_hash), ScanEffort::Failed);
        },
    };
    if caching {
        cache.store(path.clone(), content_hash, Arc::clone(&lines)).await;
    }
    tracing::debug!(path = %path.display(), hash = %content_hash, lines = lines.len(), ?effort, "Extracted document");
    Scan {
        path,
        content_hash: Some(content_hash),
        lines,
        effort,
    }
}
