//! Read-only file store abstraction for the fsmd content engine.
//!
//! This crate provides a [`Storage`] trait that decouples content resolution
//! from the underlying file store. This enables:
//!
//! - **Unit testing** without touching the real filesystem
//! - **Backend flexibility** (local directory, embedded assets, object stores)
//! - **Clean separation** between page/sitemap logic and I/O operations
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with `read()`, `read_dir()`, and `exists()` methods
//! - [`FsStorage`] implementation for a local directory tree
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use fsmd_storage::{FsStorage, Storage};
//!
//! let storage = FsStorage::new(PathBuf::from("site"));
//! for entry in storage.read_dir("markdown")? {
//!     println!("{} ({:?})", entry.name, entry.kind);
//! }
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use fs::FsStorage;
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{DirEntry, EntryKind, Storage, StorageError, StorageErrorKind};
