//! Document discovery.
//!
//! Walks one root directory and yields every document beneath it, depth
//! first, with the entries of each directory visited in file name order so
//! two scans of an unchanged tree see documents in the same order.

use crate::ScanConfiguration;
use crate::error::{EnumerationErrorKind, EnumerationFailure};
use async_stream::stream;
use futures::Stream;
use std::fs::FileType;
use std::io::Result as IoResult;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum WalkEntry {
    File(PathBuf),
    Failed(EnumerationFailure),
}

pub(crate) fn walk(root: PathBuf, config: Arc<ScanConfiguration>) -> impl Stream<Item = WalkEntry> + Send + 'static {
    stream! {
        match fs::metadata(&root).await {
            Ok(metadata) if metadata.is_dir() => {},
            Ok(_) => {
                yield WalkEntry::Failed(EnumerationFailure::new(&root, &root, EnumerationErrorKind::NotADirectory));
                return;
            },
            Err(err) => {
                yield WalkEntry::Failed(EnumerationFailure::new(&root, &root, EnumerationErrorKind::from(&err)));
                return;
            },
        }

        let mut stack = vec![root.clone()];
        'dirs: while let Some(current) = stack.pop() {
            let entries = match read_sorted(&current).await {
                Ok(entries) => entries,
                Err(err) => {
                    tracing::warn!(root = %root.display(), directory = %current.display(), error = %err, "Skipping directory that could not be listed");
                    yield WalkEntry::Failed(EnumerationFailure::new(&root, &current, EnumerationErrorKind::from(&err)));
                    continue 'dirs;
                },
            };
            let mut subdirectories = Vec::new();
            for (path, file_type) in entries {
                if file_type.is_dir() {
                    if config.recursive {
                        subdirectories.push(path);
                    }
                } else if config.is_document(&path) && is_file(&path, file_type).await {
                    yield WalkEntry::File(path);
                }
            }
            // Reversed so the stack pops them in name order.
            stack.extend(subdirectories.into_iter().rev());
        }
    }
}

async fn read_sorted(directory: &Path) -> IoResult<Vec<(PathBuf, FileType)>> {
    let mut entries = fs::read_dir(directory).await?;
    let mut listed = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        match entry.file_type().await {
            Ok(file_type) => listed.push((entry.path(), file_type)),
            // Only this entry is lost, not the rest of the directory.
            Err(err) => tracing::debug!(path = %entry.path().display(), error = %err, "Skipping unreadable entry"),
        }
    }
    listed.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(listed)
}

/// Symlinks to files count as documents; symlinked directories are never
/// followed, so the walk can't loop.
async fn is_file(path: &Path, file_type: FileType) -> bool {
    if !file_type.is_symlink() {
        return file_type.is_file();
    }
    // Note: silently drop what is most likely a broken symlink.
    fs::metadata(path).await.is_ok_and(|metadata| metadata.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use std::fs::{create_dir_all, write};
    use tempfile::TempDir;

    fn tree() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        create_dir_all(root.join("b/nested")).unwrap();
        create_dir_all(root.join("a")).unwrap();
        for file in ["z.pdf", "m.PDF", "notes.txt", "a/1.pdf", "b/2.pdf", "b/nested/3.pdf", "b/nested/4.doc"] {
            write(root.join(file), file).unwrap();
        }
        dir
    }

    async fn files(root: &Path, config: ScanConfiguration) -> Vec<PathBuf> {
        walk(root.to_path_buf(), Arc::new(config))
            .map(|entry| match entry {
                WalkEntry::File(path) => path.strip_prefix(root).unwrap().to_path_buf(),
                WalkEntry::Failed(failure) => panic!("unexpected failure: {failure}"),
            })
            .collect()
            .await
    }

    #[tokio::test]
    async fn test_recursive_walk_is_depth_first_in_name_order() {
        let dir = tree();
        let found = files(dir.path(), ScanConfiguration::default()).await;
        let expected: Vec<PathBuf> = ["m.PDF", "z.pdf", "a/1.pdf", "b/2.pdf", "b/nested/3.pdf"]
            .iter()
            .map(PathBuf::from)
            .collect();
        assert_eq!(found, expected);
    }

    #[tokio::test]
    async fn test_non_recursive_walk_stays_at_the_top() {
        let dir = tree();
        let found = files(dir.path(), ScanConfiguration::default().with_recursive(false)).await;
        assert_eq!(found, vec![PathBuf::from("m.PDF"), PathBuf::from("z.pdf")]);
    }

    #[tokio::test]
    async fn test_extension_filter() {
        let dir = tree();
        let found = files(dir.path(), ScanConfiguration::default().with_extensions(["txt", "doc"])).await;
        assert_eq!(found, vec![PathBuf::from("notes.txt"), PathBuf::from("b/nested/4.doc")]);
    }

    #[tokio::test]
    async fn test_missing_root_is_a_single_failure() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let entries: Vec<_> = walk(missing.clone(), Arc::new(ScanConfiguration::default())).collect().await;
        assert_eq!(
            entries,
            vec![WalkEntry::Failed(EnumerationFailure::new(&missing, &missing, EnumerationErrorKind::NotFound))]
        );
    }

    #[tokio::test]
    async fn test_file_as_root_is_not_a_directory() {
        let dir = tree();
        let root = dir.path().join("z.pdf");
        let entries: Vec<_> = walk(root.clone(), Arc::new(ScanConfiguration::default())).collect().await;
        assert_eq!(
            entries,
            vec![WalkEntry::Failed(EnumerationFailure::new(&root, &root, EnumerationErrorKind::NotADirectory))]
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_unlistable_subdirectory_only_skips_its_subtree() {
        use std::fs::{Permissions, set_permissions};
        use std::os::unix::fs::PermissionsExt;

        let dir = tree();
        let root = dir.path();
        let locked = root.join("b/nested");
        set_permissions(&locked, Permissions::from_mode(0o000)).unwrap();
        if std::fs::read_dir(&locked).is_ok() {
            // Privileged users can list it anyway.
            set_permissions(&locked, Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let entries: Vec<_> = walk(root.to_path_buf(), Arc::new(ScanConfiguration::default())).collect().await;
        set_permissions(&locked, Permissions::from_mode(0o755)).unwrap();

        let expected: Vec<WalkEntry> = ["m.PDF", "z.pdf", "a/1.pdf", "b/2.pdf"]
            .iter()
            .map(|file| WalkEntry::File(root.join(file)))
            .chain([WalkEntry::Failed(EnumerationFailure::new(
                root,
                &locked,
                EnumerationErrorKind::PermissionDenied,
            ))])
            .collect();
        assert_eq!(entries, expected);
        let WalkEntry::Failed(failure) = &entries[4] else { unreachable!() };
        assert!(!failure.is_root());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlinks() {
        let dir = tree();
        let root = dir.path();
        std::os::unix::fs::symlink(root.join("z.pdf"), root.join("link.pdf")).unwrap();
        std::os::unix::fs::symlink(root.join("gone.pdf"), root.join("broken.pdf")).unwrap();
        std::os::unix::fs::symlink(root.join("b"), root.join("c")).unwrap();
        let found = files(root, ScanConfiguration::default()).await;
        assert!(found.contains(&PathBuf::from("link.pdf")));
        assert!(!found.contains(&PathBuf::from("broken.pdf")));
        assert!(!found.iter().any(|path| path.starts_with("c")));
    }
}
