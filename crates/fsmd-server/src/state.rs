//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;

use fsmd_content::ContentResolver;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Resolver owning the page, sitemap and detail caches.
    pub(crate) resolver: Arc<ContentResolver>,
    /// Body served at `/robots.txt`.
    pub(crate) robots_txt: String,
    /// Application version for `ETag` invalidation.
    pub(crate) version: String,
}
