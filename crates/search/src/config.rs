use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Everything a scan needs to know besides the query.
///
/// A scan takes its own copy when it starts, so changing a configuration
/// afterwards only affects the next scan.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct ScanConfiguration {
    /// Directories to search, in order.
    pub roots: Vec<PathBuf>,
    /// Descend into subdirectories of each root.
    pub recursive: bool,
    /// Serve documents whose content hasn't changed from the cache.
    pub caching: bool,
    /// File extensions (without the dot) that count as documents. Compared
    /// case-insensitively.
    pub extensions: Vec<String>,
    /// How many documents may be read and extracted at the same time.
    pub concurrency: NonZeroUsize,
}
impl Default for ScanConfiguration {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            recursive: true,
            caching: true,
            extensions: vec!["pdf".to_string()],
            concurrency: NonZeroUsize::MIN,
        }
    }
}
impl ScanConfiguration {
    pub fn new(roots: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn with_caching(mut self, caching: bool) -> Self {
        self.caching = caching;
        self
    }

    pub fn with_extensions(mut self, extensions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Zero is treated as one.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = NonZeroUsize::new(concurrency).unwrap_or(NonZeroUsize::MIN);
        self
    }

    /// Returns `true` if the path has one of the configured document extensions.
    pub fn is_document(&self, path: impl AsRef<Path>) -> bool {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(ext))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_defaults() {
        let config = ScanConfiguration::default();
        assert!(config.roots.is_empty());
        assert!(config.recursive);
        assert!(config.caching);
        assert_eq!(config.extensions, vec!["pdf"]);
        assert_eq!(config.concurrency.get(), 1);
    }

    #[test]
    fn test_builders() {
        let config = ScanConfiguration::new(["/a", "/b"])
            .with_recursive(false)
            .with_caching(false)
            .with_extensions(["txt"])
            .with_concurrency(0);
        assert_eq!(config.roots, vec![PathBuf::from("/a"), PathBuf::from("/b")]);
        assert!(!config.recursive);
        assert!(!config.caching);
        assert_eq!(config.extensions, vec!["txt"]);
        assert_eq!(config.concurrency.get(), 1);
        assert_eq!(config.with_concurrency(8).concurrency.get(), 8);
    }

    #[rstest]
    #[case("receipt.pdf", true)]
    #[case("RECEIPT.PDF", true)]
    #[case("receipt.Pdf", true)]
    #[case("dir/receipt.pdf", true)]
    #[case("receipt.pdf.bak", false)]
    #[case("receipt.txt", false)]
    #[case("pdf", false)]
    #[case(".pdf", false)]
    #[case("receipt", false)]
    fn test_is_document(#[case] path: &str, #[case] expected: bool) {
        assert_eq!(ScanConfiguration::default().is_document(path), expected);
    }

    #[test]
    fn test_is_document_accepts_dotted_extensions() {
        let config = ScanConfiguration::default().with_extensions([".txt", "PDF"]);
        assert!(config.is_document("notes.TXT"));
        assert!(config.is_document("receipt.pdf"));
        assert!(!config.is_document("image.png"));
    }
}
