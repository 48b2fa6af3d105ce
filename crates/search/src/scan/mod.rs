mod file;
mod stream;

pub use self::file::ScanEffort;
pub(crate) use self::stream::{Scanner, scan};
