use crate::error::Result;
use crate::{ContentExtractor, Lines, split_lines};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Reads documents that already are text.
///
/// Invalid UTF-8 sequences are replaced with U+FFFD instead of failing the
/// whole document, so a single bad byte never hides the rest of the text from
/// a search.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl ContentExtractor for PlainTextExtractor {
    fn extract(&self, content: &[u8]) -> Result<Lines> {
        let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);
        Ok(split_lines(&String::from_utf8_lossy(content)))
    }
}
