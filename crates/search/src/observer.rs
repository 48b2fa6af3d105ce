use crate::error::EnumerationFailure;
use crate::models::{Document, ScanEvent, ScanSummary};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Receives the events of a scan started with
/// [`ScanOrchestrator::spawn`](crate::ScanOrchestrator::spawn).
///
/// Calls are made one at a time from the scan's task, in the order the events
/// happen; [`on_completed`](Self::on_completed) is always the last call. The
/// scan waits for each call to return, so a slow observer slows the scan
/// down instead of piling up events.
#[async_trait]
pub trait Observer: Send + Sync {
    /// A document matched. `scanned` is how many documents the scan has
    /// finished with so far, this one included.
    async fn on_match(&self, document: &Document, scanned: u64);

    /// A root (or a directory beneath it) couldn't be listed.
    async fn on_root_failed(&self, _failure: &EnumerationFailure) {}

    async fn on_completed(&self, summary: &ScanSummary);
}

#[async_trait]
impl<O: Observer + ?Sized> Observer for Arc<O> {
    async fn on_match(&self, document: &Document, scanned: u64) {
        (**self).on_match(document, scanned).await
    }

    async fn on_root_failed(&self, failure: &EnumerationFailure) {
        (**self).on_root_failed(failure).await
    }

    async fn on_completed(&self, summary: &ScanSummary) {
        (**self).on_completed(summary).await
    }
}

// A dropped receiver only means nobody is listening anymore; the scan still
// runs to completion so the cache is brought up to date.
#[async_trait]
impl Observer for mpsc::UnboundedSender<ScanEvent> {
    async fn on_match(&self, document: &Document, scanned: u64) {
        _ = self.send(ScanEvent::Match { document: document.clone(), scanned });
    }

    async fn on_root_failed(&self, failure: &EnumerationFailure) {
        _ = self.send(ScanEvent::RootFailed(failure.clone()));
    }

    async fn on_completed(&self, summary: &ScanSummary) {
        _ = self.send(ScanEvent::Completed(summary.clone()));
    }
}

#[async_trait]
impl Observer for mpsc::Sender<ScanEvent> {
    async fn on_match(&self, document: &Document, scanned: u64) {
        _ = self.send(ScanEvent::Match { document: document.clone(), scanned }).await;
    }

    async fn on_root_failed(&self, failure: &EnumerationFailure) {
        _ = self.send(ScanEvent::RootFailed(failure.clone())).await;
    }

    async fn on_completed(&self, summary: &ScanSummary) {
        _ = self.send(ScanEvent::Completed(summary.clone())).await;
    }
}

impl ScanEvent {
    /// Hands the event to the matching [`Observer`] method.
    pub async fn deliver_to(&self, observer: &(impl Observer + ?Sized)) {
        match self {
            Self::Match { document, scanned } => observer.on_match(document, *scanned).await,
            Self::RootFailed(failure) => observer.on_root_failed(failure).await,
            Self::Completed(summary) => observer.on_completed(summary).await,
        }
    }
}
