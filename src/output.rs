use async_trait::async_trait;
use sift_search::error::EnumerationFailure;
use sift_search::{Document, Observer, ScanSummary};
use std::io::{Write, stderr, stdout};

/// Prints matches to stdout as they arrive, and everything else to stderr.
pub struct Printer;

#[async_trait]
impl Observer for Printer {
    async fn on_match(&self, document: &Document, scanned: u64) {
        // Nothing sensible to do when stdout has gone away (`sift ... | head`).
        _ = writeln!(stdout().lock(), "{}", format_match(document, scanned));
    }

    async fn on_root_failed(&self, failure: &EnumerationFailure) {
        _ = writeln!(stderr().lock(), "sift: skipped {failure}");
    }

    async fn on_completed(&self, summary: &ScanSummary) {
        _ = writeln!(stderr().lock(), "{}", format_summary(summary));
    }
}

pub fn format_match(document: &Document, scanned: u64) -> String {
    format!("{scanned}\t{}\t{}", document.path.display(), document.matched.text)
}

pub fn format_summary(summary: &ScanSummary) -> String {
    let mut line = format!(
        "{} matched of {} scanned ({} cached, {} extracted",
        summary.matched, summary.total_scanned, summary.cache_hits, summary.extracted
    );
    if summary.unreadable > 0 {
        line.push_str(&format!(", {} unreadable", summary.unreadable));
    }
    if summary.extraction_failures > 0 {
        line.push_str(&format!(", {} failed", summary.extraction_failures));
    }
    line.push(')');
    if summary.is_partial() {
        line.push_str(&format!("; {} folders skipped", summary.failures.len()));
    }
    if summary.cancelled {
        line.push_str("; cancelled");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use sift_search::MatchedLine;
    use sift_search::error::EnumerationErrorKind;
    use std::path::PathBuf;

    #[test]
    fn test_format_match() {
        let document = Document {
            path: PathBuf::from("/receipts/receipt-01.pdf"),
            name: "receipt-01.pdf".to_string(),
            content_hash: None,
            matched: MatchedLine {
                index: 1,
                text: "MILK 2% GAL $4.99".to_string(),
            },
        };
        assert_eq!(format_match(&document, 7), "7\t/receipts/receipt-01.pdf\tMILK 2% GAL $4.99");
    }

    #[test]
    fn test_format_summary() {
        let mut summary = ScanSummary {
            total_scanned: 2,
            matched: 1,
            cache_hits: 1,
            extracted: 1,
            ..ScanSummary::default()
        };
        assert_eq!(format_summary(&summary), "1 matched of 2 scanned (1 cached, 1 extracted)");

        summary.extraction_failures = 1;
        summary.cancelled = true;
        summary
            .failures
            .push(EnumerationFailure::new("/gone", "/gone", EnumerationErrorKind::NotFound));
        assert_eq!(
            format_summary(&summary),
            "1 matched of 2 scanned (1 cached, 1 extracted, 1 failed); 1 folders skipped; cancelled"
        );
    }
}
