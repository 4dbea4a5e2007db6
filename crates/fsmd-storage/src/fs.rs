//! Filesystem storage implementation.
//!
//! Provides [`FsStorage`] for reading content from a local directory tree.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::storage::{DirEntry, EntryKind, Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem storage rooted at a directory.
///
/// Every path is resolved relative to the root; paths that try to climb out
/// of it are rejected with [`StorageErrorKind::InvalidPath`].
///
/// # Example
///
/// ```ignore
/// use std::path::PathBuf;
/// use fsmd_storage::{FsStorage, Storage};
///
/// let storage = FsStorage::new(PathBuf::from("site"));
/// let bytes = storage.read("markdown/_index.md")?;
/// ```
#[derive(Debug)]
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    /// Create a new filesystem storage rooted at `root`.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Map a store-relative path to an OS path under the root.
    ///
    /// Rejects paths containing parent directory components (`..`) to prevent
    /// path traversal (e.g., `../../../etc/passwd`).
    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(path.trim_start_matches('/'));

        let escapes = relative
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)));

        if escapes {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(relative)
                .with_backend(BACKEND));
        }
        Ok(self.root.join(relative))
    }
}

impl Storage for FsStorage {
    fn read(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        let full_path = self.resolve(path)?;
        fs::read(&full_path)
            .map_err(|e| StorageError::io(e, Some(full_path)).with_backend(BACKEND))
    }

    fn read_dir(&self, path: &str) -> Result<Vec<DirEntry>, StorageError> {
        let full_path = self.resolve(path)?;
        let io_err = |e| StorageError::io(e, Some(full_path.clone())).with_backend(BACKEND);

        let mut entries = Vec::new();
        for entry in fs::read_dir(&full_path).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            // Store paths are `&str`; a name that isn't UTF-8 can't be addressed.
            let Ok(name) = entry.file_name().into_string() else {
                tracing::debug!(path = %entry.path().display(), "Skipping non-UTF-8 entry name");
                continue;
            };
            // Follow symlinks so linked files and folders list like real ones.
            let Ok(file_type) = fs::metadata(entry.path()).map(|m| m.file_type()) else {
                tracing::debug!(path = %entry.path().display(), "Skipping unreadable entry");
                continue;
            };
            let kind = if file_type.is_dir() {
                EntryKind::Dir
            } else {
                EntryKind::File
            };
            entries.push(DirEntry {
                name,
                kind,
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_ok_and(|p| p.exists())
    }
}
