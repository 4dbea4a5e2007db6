//! The content resolver service object.

use std::sync::Arc;

use fsmd_storage::Storage;

use crate::cache::LruCache;
use crate::page::{Page, Resolution};
use crate::sitemap::{SitemapKey, SitemapListing};

/// Name of the file holding a folder's own page.
pub(crate) const INDEX_FILE: &str = "_index.md";

/// Markdown file extension.
pub(crate) const MARKDOWN_EXT: &str = ".md";

/// Resolver settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Store directory holding all markdown content.
    pub content_dir: String,
    /// Maximum number of cached pages.
    pub page_cache_capacity: usize,
    /// Maximum number of cached directory listings.
    pub sitemap_cache_capacity: usize,
    /// Maximum number of cached detailed pages.
    pub detail_cache_capacity: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            content_dir: "markdown".to_owned(),
            page_cache_capacity: 1000,
            sitemap_cache_capacity: 1000,
            detail_cache_capacity: 1000,
        }
    }
}

/// Resolves request paths into pages with navigation.
///
/// Owns the page, sitemap and detail caches. Construct one per process and
/// share it (it is `Send + Sync`); every cache access goes through it.
pub struct ContentResolver {
    pub(crate) storage: Arc<dyn Storage>,
    content_dir: String,
    pub(crate) pages: LruCache<String, Arc<Page>>,
    pub(crate) sitemaps: LruCache<SitemapKey, Arc<SitemapListing>>,
    pub(crate) details: LruCache<String, Resolution>,
}

impl ContentResolver {
    /// Create a resolver reading from `storage`.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>, config: ResolverConfig) -> Self {
        Self {
            storage,
            content_dir: config.content_dir.trim_matches('/').to_owned(),
            pages: LruCache::new(config.page_cache_capacity),
            sitemaps: LruCache::new(config.sitemap_cache_capacity),
            details: LruCache::new(config.detail_cache_capacity),
        }
    }

    /// Drop all cached pages, listings and detailed pages.
    ///
    /// Lookups after this call read the store again.
    pub fn invalidate(&self) {
        self.pages.clear();
        self.sitemaps.clear();
        self.details.clear();
        tracing::info!("Content caches cleared");
    }

    /// Number of entries in the page, sitemap and detail caches.
    #[must_use]
    pub fn cache_sizes(&self) -> (usize, usize, usize) {
        (self.pages.len(), self.sitemaps.len(), self.details.len())
    }

    /// Store path of the leaf file for a clean path. The root has none.
    pub(crate) fn leaf_path(&self, clean: &str) -> Option<String> {
        (clean != "/").then(|| format!("{}{clean}{MARKDOWN_EXT}", self.content_dir))
    }

    /// Store path of the folder index file for a clean path.
    pub(crate) fn index_path(&self, clean: &str) -> String {
        format!("{}/{INDEX_FILE}", self.dir_path(clean))
    }

    /// Store path of the directory for a clean path.
    pub(crate) fn dir_path(&self, clean: &str) -> String {
        if clean == "/" {
            self.content_dir.clone()
        } else {
            format!("{}{clean}", self.content_dir)
        }
    }
}
