//! Page loading: store read, front matter, markdown rendering.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::error::ContentError;
use crate::front_matter;
use crate::markdown;
use crate::page::Page;
use crate::path::clean_path;
use crate::resolver::ContentResolver;

/// Raw file found for a clean path.
struct Source {
    bytes: Vec<u8>,
    path: String,
    is_folder: bool,
}

impl ContentResolver {
    /// Load the page for `path`.
    ///
    /// Tries the leaf file `<content_dir><path>.md` first, then the folder
    /// index `<content_dir><path>/_index.md`. Returns the shared not-found
    /// page with `false` when neither exists; that is not an error.
    ///
    /// Found pages are cached; a cache hit skips the store entirely.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails for any reason other than a
    /// missing file, or if the file has malformed front matter or isn't
    /// UTF-8.
    pub fn load_page(&self, path: &str) -> Result<(Arc<Page>, bool), ContentError> {
        let clean = clean_path(path);

        if let Some(page) = self.pages.get(&clean) {
            debug!(path = %clean, "Page cache hit");
            return Ok((page, true));
        }

        let Some(source) = self.read_source(&clean)? else {
            warn!(path = %clean, "Page not found");
            return Ok((Page::not_found(), false));
        };

        let page = Arc::new(parse_page(source, &clean)?);
        debug!(path = %clean, is_folder = page.is_folder, "Page loaded");
        self.pages.insert(clean, Arc::clone(&page), false);

        Ok((page, true))
    }

    fn read_source(&self, clean: &str) -> Result<Option<Source>, ContentError> {
        if let Some(leaf) = self.leaf_path(clean)
            && let Some(bytes) = self.read_optional(&leaf)?
        {
            return Ok(Some(Source {
                bytes,
                path: leaf,
                is_folder: false,
            }));
        }

        let index = self.index_path(clean);
        Ok(self.read_optional(&index)?.map(|bytes| Source {
            bytes,
            path: index,
            is_folder: true,
        }))
    }

    fn read_optional(&self, path: &str) -> Result<Option<Vec<u8>>, ContentError> {
        match self.storage.read(path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => {
                error!(path, error = %err, "Failed to read page");
                Err(err.into())
            }
        }
    }
}

fn parse_page(source: Source, clean: &str) -> Result<Page, ContentError> {
    let Source {
        bytes,
        path,
        is_folder,
    } = source;

    let Ok(text) = String::from_utf8(bytes) else {
        error!(path = %path, "Page is not valid UTF-8");
        return Err(ContentError::Encoding {
            path: PathBuf::from(path),
        });
    };

    let (meta, body) = match front_matter::parse(&text) {
        Ok(parsed) => parsed,
        Err(err) => {
            error!(path = %path, error = %err, "Failed to parse front matter");
            return Err(ContentError::FrontMatter {
                path: PathBuf::from(path),
                message: err.to_string(),
            });
        }
    };

    Ok(Page {
        title: meta.title,
        description: meta.description,
        date: meta.date,
        content: markdown::render(body),
        url: clean.to_owned(),
        is_folder,
    })
}
