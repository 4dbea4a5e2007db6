//! Page, sitemap and resolution types.
//!
//! All of these are immutable value objects once built. They serialize to the
//! camelCase JSON shape consumed by the page-rendering layer.

use std::fmt;
use std::sync::{Arc, LazyLock};

use serde::Serialize;

use crate::markdown;

/// Markdown source of the not-found page.
const NOT_FOUND_MARKDOWN: &str = "# 404\n\nNothing found.";

/// Title of the not-found page.
pub const NOT_FOUND_TITLE: &str = "Error";

static NOT_FOUND_PAGE: LazyLock<Arc<Page>> = LazyLock::new(|| {
    Arc::new(Page {
        title: NOT_FOUND_TITLE.to_owned(),
        content: markdown::render(NOT_FOUND_MARKDOWN),
        ..Page::default()
    })
});

/// HTML produced by the markdown renderer from trusted content.
///
/// Inserted into pages without further escaping. Only the renderer can
/// create one, so request input can't end up here.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TrustedHtml(String);

impl TrustedHtml {
    pub(crate) fn from_rendered(html: String) -> Self {
        Self(html)
    }

    /// Borrow the HTML.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take ownership of the HTML.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for TrustedHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One resolvable content unit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Title from front matter (empty if missing).
    pub title: String,
    /// Description from front matter (empty if missing).
    pub description: String,
    /// Date from front matter, compared as a plain string.
    pub date: String,
    /// Rendered body.
    pub content: TrustedHtml,
    /// Clean path this page resolves at.
    pub url: String,
    /// True when loaded from a folder's `_index.md`.
    pub is_folder: bool,
}

impl Page {
    /// The shared not-found page.
    #[must_use]
    pub fn not_found() -> Arc<Page> {
        Arc::clone(&NOT_FOUND_PAGE)
    }

    /// True if `page` is the shared not-found page.
    #[must_use]
    pub fn is_not_found(page: &Arc<Page>) -> bool {
        Arc::ptr_eq(page, &NOT_FOUND_PAGE)
    }
}

/// One navigation entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapItem {
    /// Display title.
    pub title: String,
    /// Clean path of the target page.
    pub url: String,
    /// True iff `url` is the path being resolved.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_active: bool,
}

/// Ordered navigation listing.
pub type Sitemap = Vec<SitemapItem>;

/// A page plus its navigational context.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedPage {
    /// The page itself.
    #[serde(flatten)]
    pub page: Arc<Page>,
    /// Entries for the page's own directory level.
    pub sitemap: Sitemap,
    /// Entries one level down; only for non-root folder pages.
    pub index_sitemap: Sitemap,
    /// Parent "go up" target, empty if none applies.
    pub back_item: String,
}

impl DetailedPage {
    /// Detailed page for content that doesn't exist: the not-found page with
    /// no navigation.
    #[must_use]
    pub fn not_found() -> Self {
        Self {
            page: Page::not_found(),
            sitemap: Sitemap::new(),
            index_sitemap: Sitemap::new(),
            back_item: String::new(),
        }
    }
}

/// Result of resolving a request path.
#[derive(Clone, Debug)]
pub struct Resolution {
    /// Resolved page, or the not-found page when `found` is false.
    pub page: Arc<DetailedPage>,
    /// False when neither a leaf file nor a folder index exists.
    pub found: bool,
}
