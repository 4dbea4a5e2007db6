//! Directory listings for navigation.
//!
//! A listing is built once per `(path, is_index)` pair: every direct child of
//! the target directory is loaded in parallel, not-found children are
//! dropped, and the rest are sorted by date, newest first. The sorted listing
//! is cached. Turning it into a [`Sitemap`] happens on every call, because
//! the active entry depends on the path being resolved.

use std::collections::HashSet;
use std::sync::Arc;

use fsmd_storage::{DirEntry, EntryKind};
use rayon::prelude::*;
use tracing::{debug, error};

use crate::error::ContentError;
use crate::page::{Page, Sitemap, SitemapItem};
use crate::path::{clean_path, join, parent_dir};
use crate::resolver::{ContentResolver, INDEX_FILE, MARKDOWN_EXT};

/// Title of the synthetic entry prepended to root-level listings.
const HOME_TITLE: &str = "Home";

/// Sitemap cache key.
///
/// Keyed by the requested path rather than the listed directory: "children
/// of `/docs`" and "siblings of `/docs`" are different listings.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct SitemapKey {
    path: String,
    is_index: bool,
}

/// Sorted, de-duplicated children of one directory.
#[derive(Debug)]
pub(crate) struct SitemapListing {
    dir: String,
    entries: Vec<ListingEntry>,
    back_item: String,
}

#[derive(Debug)]
struct ListingEntry {
    title: String,
    url: String,
    date: String,
}

impl ListingEntry {
    /// Falls back to the file stem when the page has no title.
    fn new(page: &Page, name: &str) -> Self {
        let title = if page.title.is_empty() {
            name.to_owned()
        } else {
            page.title.clone()
        };
        Self {
            title,
            url: page.url.clone(),
            date: page.date.clone(),
        }
    }
}

/// Navigation for one directory level, as seen from a specific path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SitemapOutput {
    /// Entries, with `is_active` set for the requesting path.
    pub sitemap: Sitemap,
    /// Parent "go up" target, empty if none applies.
    pub back_item: String,
}

impl SitemapListing {
    fn render(&self, clean: &str) -> SitemapOutput {
        let mut sitemap = Vec::with_capacity(self.entries.len() + 1);

        if self.dir == "/" {
            sitemap.push(SitemapItem {
                title: HOME_TITLE.to_owned(),
                url: "/".to_owned(),
                is_active: clean == "/",
            });
        }

        sitemap.extend(self.entries.iter().map(|entry| SitemapItem {
            title: entry.title.clone(),
            url: entry.url.clone(),
            is_active: entry.url == clean,
        }));

        SitemapOutput {
            sitemap,
            back_item: self.back_item.clone(),
        }
    }
}

impl ContentResolver {
    /// Build the navigation listing around `path`.
    ///
    /// With `is_index` the listing covers the children of `path` itself;
    /// otherwise it covers the siblings of `path` (children of its parent).
    /// Root-level listings start with a synthetic "Home" entry.
    ///
    /// `back_item` is the parent of `path`, set only for sibling listings of
    /// a non-root path whose directory has an `_index.md`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory can't be listed or any child page
    /// fails to load. No partial listing is returned or cached.
    pub fn build_sitemap(&self, path: &str, is_index: bool) -> Result<SitemapOutput, ContentError> {
        let clean = clean_path(path);
        let key = SitemapKey {
            path: clean.clone(),
            is_index,
        };

        let listing = if let Some(listing) = self.sitemaps.get(&key) {
            debug!(path = %clean, is_index, "Sitemap cache hit");
            listing
        } else {
            let listing = Arc::new(self.list_directory(&clean, is_index)?);
            self.sitemaps.insert(key, Arc::clone(&listing), false);
            listing
        };

        Ok(listing.render(&clean))
    }

    fn list_directory(&self, clean: &str, is_index: bool) -> Result<SitemapListing, ContentError> {
        let dir = if is_index {
            clean.to_owned()
        } else {
            parent_dir(clean)
        };

        let store_dir = self.dir_path(&dir);
        let listing = self.storage.read_dir(&store_dir).map_err(|err| {
            error!(dir = %store_dir, error = %err, "Failed to list directory");
            ContentError::from(err)
        })?;

        let has_index = listing
            .iter()
            .any(|entry| entry.is_file() && entry.name == INDEX_FILE);
        let names: Vec<&str> = listing.iter().filter_map(child_name).collect();

        // Indexed collect keeps listing order regardless of completion order.
        let loaded = names
            .par_iter()
            .map(|name| -> Result<Option<ListingEntry>, ContentError> {
                let (page, found) = self.load_page(&join(&dir, name))?;
                Ok(found.then(|| ListingEntry::new(&page, name)))
            })
            .collect::<Result<Vec<_>, ContentError>>()?;

        let mut seen = HashSet::new();
        let mut entries: Vec<ListingEntry> = loaded
            .into_iter()
            .flatten()
            .filter(|entry| seen.insert(entry.url.clone()))
            .collect();
        // Stable: equal dates keep listing order.
        entries.sort_by(|a, b| b.date.cmp(&a.date));

        let back_item = if !is_index && has_index && clean != "/" {
            parent_dir(clean)
        } else {
            String::new()
        };

        debug!(dir = %dir, is_index, entries = entries.len(), has_index, "Sitemap built");

        Ok(SitemapListing {
            dir,
            entries,
            back_item,
        })
    }
}

/// Page name for a directory entry, if it can be one.
///
/// Markdown files map to their stem and sub-directories to their own name
/// (resolved through their `_index.md`). The folder index itself and every
/// other file are skipped.
fn child_name(entry: &DirEntry) -> Option<&str> {
    match entry.kind {
        EntryKind::Dir => Some(entry.name.as_str()),
        EntryKind::File if entry.name == INDEX_FILE => None,
        EntryKind::File => entry
            .name
            .strip_suffix(MARKDOWN_EXT)
            .filter(|stem| !stem.is_empty()),
    }
}

#[cfg(test)]
mod tests {
    use fsmd_storage::{MockStorage, StorageErrorKind};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::resolver::ResolverConfig;

    fn item(title: &str, url: &str, is_active: bool) -> SitemapItem {
        SitemapItem {
            title: title.to_owned(),
            url: url.to_owned(),
            is_active,
        }
    }

    fn page(title: &str, date: &str) -> String {
        format!("---\ntitle: {title}\ndate: {date}\n---\nBody\n")
    }

    fn resolver(storage: MockStorage) -> (Arc<MockStorage>, ContentResolver) {
        let storage = Arc::new(storage);
        let resolver =
            ContentResolver::new(Arc::<MockStorage>::clone(&storage), ResolverConfig::default());
        (storage, resolver)
    }

    fn docs_tree() -> MockStorage {
        MockStorage::new()
            .with_file("markdown/_index.md", page("Root", ""))
            .with_file("markdown/docs/_index.md", page("Docs", ""))
            .with_file("markdown/docs/a.md", page("A", "2024-01-01"))
            .with_file("markdown/docs/b.md", page("B", "2023-06-01"))
            .with_file("markdown/docs/c.md", page("C", "2024-06-01"))
            .with_file("markdown/docs/notes.txt", "ignored")
    }

    #[test]
    fn test_siblings_sorted_by_date_descending() {
        let (_, resolver) = resolver(docs_tree());

        let out = resolver.build_sitemap("/docs/a", false).unwrap();

        assert_eq!(
            out.sitemap,
            vec![
                item("C", "/docs/c", false),
                item("A", "/docs/a", true),
                item("B", "/docs/b", false),
            ]
        );
    }

    #[test]
    fn test_index_file_excluded_and_sets_back_item() {
        let (_, resolver) = resolver(
            MockStorage::new()
                .with_file("markdown/docs/guides/_index.md", page("Guides", ""))
                .with_file("markdown/docs/guides/a.md", page("A", ""))
                .with_file("markdown/docs/guides/b.md", page("B", "")),
        );

        let out = resolver.build_sitemap("/docs/guides/a", false).unwrap();

        let urls: Vec<&str> = out.sitemap.iter().map(|i| i.url.as_str()).collect();
        assert_eq!(urls, vec!["/docs/guides/a", "/docs/guides/b"]);
        assert_eq!(out.back_item, "/docs/guides");
    }

    #[test]
    fn test_no_back_item_without_index_file() {
        let (_, resolver) = resolver(
            MockStorage::new()
                .with_file("markdown/docs/a.md", page("A", ""))
                .with_file("markdown/docs/b.md", page("B", "")),
        );

        let out = resolver.build_sitemap("/docs/a", false).unwrap();

        assert_eq!(out.back_item, "");
    }

    #[test]
    fn test_index_listing_has_children_and_no_back_item() {
        let (_, resolver) = resolver(docs_tree());

        let out = resolver.build_sitemap("/docs", true).unwrap();

        let titles: Vec<&str> = out.sitemap.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["C", "A", "B"]);
        assert!(out.sitemap.iter().all(|i| !i.is_active));
        assert_eq!(out.back_item, "");
    }

    #[test]
    fn test_root_listing_starts_with_home() {
        let (_, resolver) = resolver(docs_tree().with_file("markdown/about.md", page("About", "")));

        let at_root = resolver.build_sitemap("/", false).unwrap();
        let at_about = resolver.build_sitemap("/about", false).unwrap();

        assert_eq!(at_root.sitemap[0], item("Home", "/", true));
        assert_eq!(at_about.sitemap[0], item("Home", "/", false));
        assert_eq!(at_root.back_item, "");
        assert!(at_about.sitemap.contains(&item("About", "/about", true)));
    }

    #[test]
    fn test_sub_directory_listed_through_its_index() {
        let (_, resolver) = resolver(docs_tree());

        let out = resolver.build_sitemap("/", false).unwrap();

        assert_eq!(
            out.sitemap,
            vec![item("Home", "/", true), item("Docs", "/docs", false)]
        );
    }

    #[test]
    fn test_sub_directory_without_index_is_skipped() {
        let (_, resolver) = resolver(
            MockStorage::new()
                .with_file("markdown/docs/a.md", page("A", ""))
                .with_dir("markdown/docs/empty"),
        );

        let out = resolver.build_sitemap("/docs/a", false).unwrap();

        assert_eq!(out.sitemap, vec![item("A", "/docs/a", true)]);
    }

    #[test]
    fn test_title_falls_back_to_file_stem() {
        let (_, resolver) = resolver(
            MockStorage::new()
                .with_file("markdown/docs/untitled.md", "No header.")
                .with_file("markdown/docs/named.md", page("Named", "")),
        );

        let out = resolver.build_sitemap("/docs/named", false).unwrap();
        let (cached, _) = resolver.load_page("/docs/untitled").unwrap();

        assert!(out.sitemap.contains(&item("untitled", "/docs/untitled", false)));
        assert_eq!(cached.title, "");
    }

    #[test]
    fn test_equal_dates_keep_listing_order() {
        let mut storage = MockStorage::new();
        let names: Vec<String> = (0..40).map(|i| format!("p{i:02}")).collect();
        for name in &names {
            storage = storage.with_file(&format!("markdown/many/{name}.md"), page(name, "2024-01-01"));
        }
        let (_, resolver) = resolver(storage);

        let out = resolver.build_sitemap("/many", true).unwrap();

        let titles: Vec<String> = out.sitemap.into_iter().map(|i| i.title).collect();
        assert_eq!(titles, names);
    }

    #[test]
    fn test_leaf_and_folder_with_same_name_listed_once() {
        let (_, resolver) = resolver(
            MockStorage::new()
                .with_file("markdown/docs/api.md", page("API", ""))
                .with_file("markdown/docs/api/_index.md", page("API folder", "")),
        );

        let out = resolver.build_sitemap("/docs", true).unwrap();

        assert_eq!(out.sitemap, vec![item("API", "/docs/api", false)]);
    }

    #[test]
    fn test_listing_cached_per_path_and_kind() {
        let (storage, resolver) = resolver(docs_tree());

        resolver.build_sitemap("/docs/a", false).unwrap();
        let reads = storage.read_count();
        let again = resolver.build_sitemap("/docs/a", false).unwrap();
        resolver.build_sitemap("/docs", true).unwrap();

        assert_eq!(storage.read_count(), reads);
        assert_eq!(again.sitemap[1], item("A", "/docs/a", true));
        assert_eq!(resolver.cache_sizes().1, 2);
    }

    #[test]
    fn test_child_failure_aborts_build() {
        let (_, resolver) = resolver(
            docs_tree().with_error("markdown/docs/b.md", StorageErrorKind::PermissionDenied),
        );

        let err = resolver.build_sitemap("/docs/a", false).unwrap_err();

        assert!(matches!(err, ContentError::Storage(ref e) if e.kind == StorageErrorKind::PermissionDenied));
        assert_eq!(resolver.cache_sizes().1, 0);
    }

    #[test]
    fn test_child_parse_failure_aborts_build() {
        let (_, resolver) = resolver(docs_tree().with_file("markdown/docs/bad.md", "---\n: [\n---\n"));

        let err = resolver.build_sitemap("/docs", true).unwrap_err();

        assert!(matches!(err, ContentError::FrontMatter { .. }));
    }

    #[test]
    fn test_missing_directory_is_error() {
        let (_, resolver) = resolver(MockStorage::new().with_dir("markdown"));

        let err = resolver.build_sitemap("/nope", true).unwrap_err();

        assert!(matches!(err, ContentError::Storage(ref e) if e.is_not_found()));
    }

    #[test]
    fn test_child_name() {
        assert_eq!(child_name(&DirEntry::file("intro.md")), Some("intro"));
        assert_eq!(child_name(&DirEntry::file("_index.md")), None);
        assert_eq!(child_name(&DirEntry::file("image.png")), None);
        assert_eq!(child_name(&DirEntry::file(".md")), None);
        assert_eq!(child_name(&DirEntry::dir("guides")), Some("guides"));
    }
}
