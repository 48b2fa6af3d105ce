//! The path-keyed document registry.

use crate::models::{ContentHash, DocumentRecord};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use time::UtcDateTime;
use tokio::sync::RwLock;

/// Registry of [`DocumentRecord`]s, keyed by document path.
///
/// Records are created on first encounter, updated in place when a document's
/// content changes, and never removed. The registry is behind a [`RwLock`] so
/// a shared `Arc<DocumentCache>` can be used from any task; making a whole
/// lookup → validate → store sequence atomic for one path is the caller's job
/// (see `sift_search::ScanOrchestrator`).
#[derive(Debug, Default)]
pub struct DocumentCache {
    records: RwLock<HashMap<PathBuf, DocumentRecord>>,
}
impl DocumentCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the record for a path, if the path has ever been encountered.
    pub async fn lookup(&self, path: impl AsRef<Path>) -> Option<DocumentRecord> {
        self.records.read().await.get(path.as_ref()).cloned()
    }

    /// Get the record for a path, registering an empty record if this is the
    /// first time the path has been encountered.
    pub async fn lookup_or_register(&self, path: impl AsRef<Path>) -> DocumentRecord {
        let path = path.as_ref();
        if let Some(record) = self.lookup(path).await {
            return record;
        }
        let mut guard = self.records.write().await;
        guard
            .entry(path.to_path_buf())
            .or_insert_with(|| {
                tracing::trace!(path = %path.display(), "Registered new document");
                DocumentRecord::new(path)
            })
            .clone()
    }

    /// Decides whether a record's cached lines can be used for content whose
    /// freshly computed hash is `fresh`.
    ///
    /// Only valid when caching is enabled, the record has a stored hash, and
    /// that hash equals `fresh`. A record with a hash but without lines (which
    /// [`store`](Self::store) never produces) is never valid either.
    pub fn is_valid(record: &DocumentRecord, fresh: &ContentHash, caching_enabled: bool) -> bool {
        caching_enabled && record.lines.is_some() && record.content_hash.as_ref() == Some(fresh)
    }

    /// Remember the lines extracted from content with the given hash.
    ///
    /// Overwrites whatever was stored for the path before.
    pub async fn store(&self, path: impl Into<PathBuf>, hash: ContentHash, lines: impl Into<Arc<[String]>>) {
        let path = path.into();
        let lines = lines.into();
        tracing::debug!(path = %path.display(), hash = %hash, lines = lines.len(), "Caching extracted document");
        let mut guard = self.records.write().await;
        let record = guard.entry(path).or_insert_with_key(|path| DocumentRecord::new(path.clone()));
        record.content_hash = Some(hash);
        record.lines = Some(lines);
        record.extracted_at = Some(UtcDateTime::now());
    }

    /// Forget the content of every record, keeping the records themselves.
    ///
    /// Every document is re-extracted the next time it is scanned. Returns the
    /// number of records that held content.
    pub async fn invalidate_all(&self) -> usize {
        let mut guard = self.records.write().await;
        let mut invalidated = 0;
        for record in guard.values_mut() {
            if record.is_populated() {
                invalidated += 1;
            }
            record.content_hash = None;
            record.lines = None;
            record.extracted_at = None;
        }
        tracing::info!(invalidated, "Invalidated cached document content");
        invalidated
    }

    /// Number of registered paths (populated or not).
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}
