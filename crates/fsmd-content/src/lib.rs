//! Markdown content resolution for fsmd.
//!
//! Turns request paths into rendered pages with navigation, reading from a
//! read-only [`Storage`](fsmd_storage::Storage). Content lives under a single
//! directory (`markdown` by default) where every path `P` maps to either the
//! leaf file `P.md` or the folder index `P/_index.md`.
//!
//! # Architecture
//!
//! [`ContentResolver`] is the single service object. It owns three LRU caches
//! and exposes:
//!
//! - [`ContentResolver::resolve`]: the entry point, producing a
//!   [`DetailedPage`] (page, sibling sitemap, child sitemap, back link)
//! - [`ContentResolver::load_page`]: one page with front matter and HTML body
//! - [`ContentResolver::build_sitemap`]: one directory level, loaded in
//!   parallel and sorted by date, newest first
//!
//! A missing page is not an error: `resolve` returns a [`Resolution`] with
//! `found = false` carrying the shared not-found page.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use fsmd_content::{ContentResolver, ResolverConfig};
//! use fsmd_storage::FsStorage;
//!
//! let storage = Arc::new(FsStorage::new("site".into()));
//! let resolver = ContentResolver::new(storage, ResolverConfig::default());
//!
//! let resolution = resolver.resolve("/docs/intro")?;
//! if resolution.found {
//!     println!("{}", resolution.page.page.title);
//! }
//! ```

mod cache;
mod details;
mod error;
mod front_matter;
mod loader;
mod markdown;
mod page;
mod path;
mod resolver;
mod sitemap;

pub use cache::LruCache;
pub use error::ContentError;
pub use page::{DetailedPage, NOT_FOUND_TITLE, Page, Resolution, Sitemap, SitemapItem, TrustedHtml};
pub use path::clean_path;
pub use resolver::{ContentResolver, ResolverConfig};
pub use sitemap::SitemapOutput;
