use crate::error::{ErrorKind, Result};
use crate::{ContentExtractor, Lines, split_lines};

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Extracts the text layer of PDF documents.
///
/// Only the text in content order is recovered; no layout reconstruction is
/// attempted. Scanned receipts without a text layer simply have no lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractor;

impl ContentExtractor for PdfExtractor {
    fn extract(&self, content: &[u8]) -> Result<Lines> {
        if !content.starts_with(PDF_MAGIC) {
            exn::bail!(ErrorKind::InvalidDocument("missing %PDF- header".to_string()));
        }
        // pdf-extract's error type doesn't promise Send + Sync, so it can't be
        // a child in the error tree. Keep its description instead.
        let text = pdf_extract::extract_text_from_mem(content)
            .map_err(|e| ErrorKind::InvalidDocument(format!("{e:?}")))?;
        Ok(split_lines(&text))
    }
}
