use crate::ScanConfiguration;
use crate::error::EnumerationFailure;
use crate::models::{Document, MatchedLine, ScanEvent, ScanSummary};
use crate::scan::file::{Scan, scan_file};
use crate::walk::{WalkEntry, walk};
use async_stream::stream;
use futures::{Stream, StreamExt, future};
use sift_cache::DocumentCache;
use sift_extract::ContentExtractor;
use sift_query::Matcher;
use std::collections::HashSet;
use std::pin::pin;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

/// Everything shared by the scans of one orchestrator.
#[derive(Clone)]
pub(crate) struct Scanner {
    pub cache: Arc<DocumentCache>,
    pub extractor: Arc<dyn ContentExtractor>,
    /// Held for the whole of a scan. Two scans never interleave, so a
    /// document's cache record is only ever updated by one of them at a time.
    pub gate: Arc<Mutex<()>>,
}

enum Outcome {
    Failed(EnumerationFailure),
    Scanned(Scan, Option<usize>),
    Skipped,
}

/// Runs one scan, yielding its events in order.
///
/// Documents are visited root by root, in the order the roots are
/// configured. A document reachable from more than one root is only scanned
/// the first time it is seen. Up to `config.concurrency` documents are read
/// and extracted at once, but results are always handed back in discovery
/// order, so the `scanned` count of successive matches strictly increases.
///
/// Cancellation is checked before each document is touched. Documents that
/// were already being read when the token fired are finished, counted and
/// reported; nothing after them is visited, and the scan still finishes with
/// [`ScanEvent::Completed`].
pub(crate) fn scan(
    scanner: Scanner,
    config: ScanConfiguration,
    matcher: Matcher,
    cancel: CancellationToken,
) -> impl Stream<Item = ScanEvent> + Send + 'static {
    stream! {
        let _gate = Arc::clone(&scanner.gate).lock_owned().await;
        tracing::info!(
            roots = config.roots.len(),
            recursive = config.recursive,
            caching = config.caching,
            concurrency = config.concurrency.get(),
            "Scan started"
        );
        let config = Arc::new(config);
        let matcher = Arc::new(matcher);
        let concurrency = config.concurrency.get();

        let mut seen = HashSet::new();
        let entries = futures::stream::iter(config.roots.clone())
            .flat_map({
                let config = Arc::clone(&config);
                move |root| walk(root, Arc::clone(&config))
            })
            .filter(move |entry| future::ready(match entry {
                WalkEntry::File(path) => seen.insert(path.clone()),
                WalkEntry::Failed(_) => true,
            }))
            .take_until(cancel.clone().cancelled_owned());
        let outcomes = entries
            .map({
                let (scanner, matcher, cancel) = (scanner.clone(), Arc::clone(&matcher), cancel.clone());
                let caching = config.caching;
                move |entry| visit(scanner.clone(), Arc::clone(&matcher), cancel.clone(), entry, caching)
            })
            .buffered(concurrency);
        let mut outcomes = pin!(outcomes);

        let mut summary = ScanSummary::default();
        while let Some(outcome) = outcomes.next().await {
            match outcome {
                Outcome::Failed(failure) => {
                    tracing::warn!(root = %failure.root.display(), directory = %failure.directory.display(), error = %failure.kind, "Directory could not be listed");
                    summary.failures.push(failure.clone());
                    yield ScanEvent::RootFailed(failure);
                },
                Outcome::Scanned(scan, found) => {
                    summary.record(scan.effort);
                    if let Some(index) = found {
                        summary.matched += 1;
                        yield ScanEvent::Match { document: document(scan, index), scanned: summary.total_scanned };
                    }
                },
                Outcome::Skipped => {},
            }
        }
        summary.cancelled = cancel.is_cancelled();

        tracing::info!(
            scanned = summary.total_scanned,
            matched = summary.matched,
            cache_hits = summary.cache_hits,
            extracted = summary.extracted,
            unreadable = summary.unreadable,
            extraction_failures = summary.extraction_failures,
            failures = summary.failures.len(),
            cancelled = summary.cancelled,
            "Scan finished"
        );
        yield ScanEvent::Completed(summary);
    }
}

async fn visit(
    scanner: Scanner,
    matcher: Arc<Matcher>,
    cancel: CancellationToken,
    entry: WalkEntry,
    caching: bool,
) -> Outcome {
    match entry {
        WalkEntry::Failed(failure) => Outcome::Failed(failure),
        WalkEntry::File(_) if cancel.is_cancelled() => Outcome::Skipped,
        WalkEntry::File(path) => {
            let scan = scan_file(&scanner.cache, &scanner.extractor, path, caching).await;
            let found = matcher.find(&scan.lines);
            Outcome::Scanned(scan, found)
        },
    }
}

fn document(scan: Scan, index: usize) -> Document {
    let name = sift_cache::file_name(&scan.path);
    let text = scan.lines.get(index).cloned().unwrap_or_default();
    Document {
        path: scan.path,
        name,
        content_hash: scan.content_hash,
        matched: MatchedLine { index, text },
    }
}
