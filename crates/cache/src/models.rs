use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use time::UtcDateTime;

/// Fixed-length (256-bit) BLAKE3 digest of a file's complete contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash(blake3::Hash);
impl ContentHash {
    /// Hashes the complete contents of a document.
    pub fn of(content: impl AsRef<[u8]>) -> Self {
        Self(blake3::hash(content.as_ref()))
    }

    pub fn as_bytes(&self) -> &[u8; blake3::OUT_LEN] {
        self.0.as_bytes()
    }
}
impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}
impl From<[u8; blake3::OUT_LEN]> for ContentHash {
    fn from(bytes: [u8; blake3::OUT_LEN]) -> Self {
        Self(blake3::Hash::from(bytes))
    }
}

/// Everything the cache knows about one document path.
///
/// A record starts out empty the first time its path is encountered and is
/// then updated in place whenever the document is (re-)extracted. When
/// `lines` is present it was extracted from exactly the bytes whose hash is
/// `content_hash`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRecord {
    pub path: PathBuf,
    /// Hash of the bytes the lines were extracted from. `None` until the
    /// document has been extracted with caching enabled.
    pub content_hash: Option<ContentHash>,
    pub lines: Option<Arc<[String]>>,
    pub extracted_at: Option<UtcDateTime>,
}
impl DocumentRecord {
    /// Create the empty record for a path that hasn't been extracted yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            content_hash: None,
            lines: None,
            extracted_at: None,
        }
    }

    /// File name component of the path, as shown to people.
    pub fn name(&self) -> String {
        file_name(&self.path)
    }

    /// Returns `true` if this record holds extracted lines for some content.
    pub fn is_populated(&self) -> bool {
        self.content_hash.is_some() && self.lines.is_some()
    }
}

/// File name component of `path`, or the whole path when it has none.
pub fn file_name(path: &Path) -> String {
    path.file_name().unwrap_or(path.as_os_str()).to_string_lossy().into_owned()
}
