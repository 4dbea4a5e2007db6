//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::storage::{DirEntry, Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// Normalize a store path: no leading or trailing slashes.
fn normalize(path: &str) -> String {
    path.trim_matches('/').to_owned()
}

/// Split a normalized path into parent directory and name.
fn split_path(path: &str) -> (&str, &str) {
    match path.rsplit_once('/') {
        Some((dir, name)) => (dir, name),
        None => ("", path),
    }
}

/// Mock storage for testing.
///
/// Stores files in memory. Parent directories are implied by file paths.
/// Use the builder methods to configure the mock with test data, and
/// [`MockStorage::with_error`] to inject failures for a specific path.
///
/// # Example
///
/// ```ignore
/// use fsmd_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_file("markdown/_index.md", "---\ntitle: Home\n---\nWelcome.")
///     .with_file("markdown/docs/intro.md", "# Intro");
///
/// let entries = storage.read_dir("markdown")?;
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    files: RwLock<BTreeMap<String, Vec<u8>>>,
    dirs: RwLock<BTreeSet<String>>,
    errors: RwLock<HashMap<String, StorageErrorKind>>,
    reads: AtomicUsize,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, creating its parent directories.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_file(self, path: &str, content: impl Into<Vec<u8>>) -> Self {
        let path = normalize(path);
        self.add_parents(&path);
        self.files.write().unwrap().insert(path, content.into());
        self
    }

    /// Add an empty directory.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_dir(self, path: &str) -> Self {
        let path = normalize(path);
        self.add_parents(&path);
        self.dirs.write().unwrap().insert(path);
        self
    }

    /// Make every operation on `path` fail with `kind`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_error(self, path: &str, kind: StorageErrorKind) -> Self {
        self.errors.write().unwrap().insert(normalize(path), kind);
        self
    }

    /// Number of successful and failed `read` calls so far.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn add_parents(&self, path: &str) {
        let mut dirs = self.dirs.write().unwrap();
        let mut current = path;
        while let Some((parent, _)) = current.rsplit_once('/') {
            dirs.insert(parent.to_owned());
            current = parent;
        }
        dirs.insert(String::new());
    }

    fn injected_error(&self, path: &str) -> Option<StorageError> {
        self.errors.read().unwrap().get(path).map(|kind| {
            StorageError::new(*kind)
                .with_path(path)
                .with_backend(BACKEND)
        })
    }
}

impl Storage for MockStorage {
    fn read(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let path = normalize(path);
        if let Some(err) = self.injected_error(&path) {
            return Err(err);
        }
        self.files
            .read()
            .unwrap()
            .get(&path)
            .cloned()
            .ok_or_else(|| StorageError::not_found(&path).with_backend(BACKEND))
    }

    fn read_dir(&self, path: &str) -> Result<Vec<DirEntry>, StorageError> {
        let path = normalize(path);
        if let Some(err) = self.injected_error(&path) {
            return Err(err);
        }

        let dirs = self.dirs.read().unwrap();
        if !dirs.contains(&path) {
            return Err(StorageError::not_found(&path).with_backend(BACKEND));
        }

        let mut entries: Vec<DirEntry> = Vec::new();
        for file in self.files.read().unwrap().keys() {
            let (dir, name) = split_path(file);
            if dir == path {
                entries.push(DirEntry::file(name));
            }
        }
        for dir_path in dirs.iter().filter(|d| !d.is_empty()) {
            let (dir, name) = split_path(dir_path);
            if dir == path {
                entries.push(DirEntry::dir(name));
            }
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn exists(&self, path: &str) -> bool {
        let path = normalize(path);
        self.files.read().unwrap().contains_key(&path) || self.dirs.read().unwrap().contains(&path)
    }
}
