//! Detailed page assembly: page plus sibling and child navigation.

use std::sync::Arc;

use tracing::{debug, error};

use crate::error::ContentError;
use crate::page::{DetailedPage, Resolution, Sitemap};
use crate::path::clean_path;
use crate::resolver::ContentResolver;
use crate::sitemap::SitemapOutput;

impl ContentResolver {
    /// Resolve a request path into a page with its navigation.
    ///
    /// This is the main entry point. The path is normalized first, so any
    /// slash-separated path is accepted. For folder pages other than the
    /// root, the child listing is built alongside the sibling listing.
    ///
    /// A path with neither a leaf file nor a folder index resolves to the
    /// not-found page with `found = false`, never to an error. Results are
    /// cached; not-found results are evicted before found ones.
    ///
    /// # Errors
    ///
    /// Returns the first error from loading the page or building either
    /// listing. No partial result is returned.
    pub fn resolve(&self, path: &str) -> Result<Resolution, ContentError> {
        let clean = clean_path(path);

        if let Some(resolution) = self.details.get(&clean) {
            debug!(path = %clean, found = resolution.found, "Detail cache hit");
            return Ok(resolution);
        }

        let (page, found) = self.load_page(&clean)?;

        if !found {
            let resolution = Resolution {
                page: Arc::new(DetailedPage::not_found()),
                found: false,
            };
            self.details.insert(clean, resolution.clone(), true);
            return Ok(resolution);
        }

        let with_children = page.is_folder && clean != "/";
        let (children, siblings) = rayon::join(
            || {
                if with_children {
                    self.build_sitemap(&clean, true).map(Some)
                } else {
                    Ok(None)
                }
            },
            || self.build_sitemap(&clean, false),
        );

        let index_sitemap = children
            .inspect_err(|err| error!(path = %clean, error = %err, "Failed to build child sitemap"))?
            .map_or_else(Sitemap::new, |out| out.sitemap);
        let SitemapOutput { sitemap, back_item } = siblings
            .inspect_err(|err| error!(path = %clean, error = %err, "Failed to build sitemap"))?;

        let back_item = if back_item == "/" {
            String::new()
        } else {
            back_item
        };

        let resolution = Resolution {
            page: Arc::new(DetailedPage {
                page,
                sitemap,
                index_sitemap,
                back_item,
            }),
            found: true,
        };
        self.details.insert(clean, resolution.clone(), false);

        Ok(resolution)
    }
}
