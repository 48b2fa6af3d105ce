use crate::error::{ErrorKind, Result};
use crate::models::{ScanEvent, ScanSummary};
use crate::observer::Observer;
use crate::scan::{Scanner, scan};
use crate::ScanConfiguration;
use exn::ResultExt;
use futures::{Stream, StreamExt};
use sift_cache::DocumentCache;
use sift_extract::ContentExtractor;
use sift_query::{Matcher, SearchQuery};
use std::pin::pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

static SCAN_IDS: AtomicU64 = AtomicU64::new(1);

/// Runs scans against a shared cache and extractor.
///
/// Any number of scans can be started, from any number of tasks, but they are
/// carried out one after the other: a scan waits for the previous one to
/// finish before it touches its first document.
#[derive(Clone)]
pub struct ScanOrchestrator {
    scanner: Scanner,
}
impl ScanOrchestrator {
    pub fn new(cache: Arc<DocumentCache>, extractor: impl ContentExtractor + 'static) -> Self {
        Self {
            scanner: Scanner {
                cache,
                extractor: Arc::new(extractor),
                gate: Arc::new(Mutex::new(())),
            },
        }
    }

    pub fn cache(&self) -> &Arc<DocumentCache> {
        &self.scanner.cache
    }

    /// Scans with an already compiled matcher, yielding events as they
    /// happen. The last event is always [`ScanEvent::Completed`].
    ///
    /// Nothing happens until the stream is polled. Dropping the stream
    /// abandons the scan; documents already scanned keep their cache updates.
    pub fn scan(
        &self,
        config: ScanConfiguration,
        matcher: Matcher,
        cancel: CancellationToken,
    ) -> impl Stream<Item = ScanEvent> + Send + 'static {
        scan(self.scanner.clone(), config, matcher, cancel)
    }

    /// Compiles the query and starts scanning on a new Tokio task, delivering
    /// every event to `observer`.
    ///
    /// The configuration is copied, so changing it afterwards doesn't affect
    /// the running scan. Must be called from within a Tokio runtime.
    ///
    /// # Errors
    /// [`ErrorKind::Query`] if the query doesn't compile. Nothing is scanned
    /// and the observer is never called.
    pub fn spawn(
        &self,
        config: &ScanConfiguration,
        query: &SearchQuery,
        observer: impl Observer + 'static,
    ) -> Result<ScanHandle> {
        let matcher = query.compile().map_err(ErrorKind::query)?;
        let id = SCAN_IDS.fetch_add(1, Ordering::Relaxed);
        let span = tracing::info_span!("scan", id, query = %query.text, wildcard = query.wildcard);
        let cancel = CancellationToken::new();
        let events = self.scan(config.clone(), matcher, cancel.clone());
        let task = tokio::spawn(
            async move {
                let mut events = pin!(events);
                let mut summary = ScanSummary::default();
                while let Some(event) = events.next().await {
                    event.deliver_to(&observer).await;
                    if let ScanEvent::Completed(completed) = event {
                        summary = completed;
                    }
                }
                summary
            }
            .instrument(span),
        );
        Ok(ScanHandle { cancel, task })
    }
}

/// A scan running on its own task.
///
/// Dropping the handle doesn't stop the scan.
#[derive(Debug)]
pub struct ScanHandle {
    cancel: CancellationToken,
    task: JoinHandle<ScanSummary>,
}
impl ScanHandle {
    /// Asks the scan to stop before its next document. The observer still
    /// receives [`Observer::on_completed`], with
    /// [`ScanSummary::cancelled`] set.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// A token that cancels this scan, for handing to other tasks.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits for the scan to finish and returns its summary.
    ///
    /// # Errors
    /// [`ErrorKind::Worker`] if the scan's task panicked or was aborted.
    pub async fn wait(self) -> Result<ScanSummary> {
        self.task.await.or_raise(|| ErrorKind::Worker)
    }
}
