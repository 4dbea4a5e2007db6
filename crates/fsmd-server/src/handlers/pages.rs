//! Pages API endpoint.
//!
//! Resolves a request path into a page with its navigation and returns it
//! as JSON. Missing pages answer `404` with the not-found page in the same
//! shape, so clients render both the same way.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use md5::{Digest, Md5};

use crate::error::ServerError;
use crate::state::AppState;

/// Handle GET /api/pages/ (root page).
pub(crate) async fn get_root_page(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    get_page_impl("/".to_owned(), state, &headers).await
}

/// Handle GET /api/pages/{path}.
pub(crate) async fn get_page(
    Path(path): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    get_page_impl(path, state, &headers).await
}

/// Shared implementation for page resolution.
async fn get_page_impl(
    path: String,
    state: Arc<AppState>,
    headers: &HeaderMap,
) -> Result<Response, ServerError> {
    // Resolution does blocking store reads and fans out on the rayon pool.
    let resolver = Arc::clone(&state.resolver);
    let resolution = tokio::task::spawn_blocking(move || resolver.resolve(&path)).await??;

    let body = serde_json::to_vec(&*resolution.page)?;

    if !resolution.found {
        return Ok((
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response());
    }

    let etag = compute_etag(&state.version, &body);

    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && if_none_match.as_bytes() == etag.as_bytes()
    {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_owned()),
            (header::ETAG, etag),
            (header::CACHE_CONTROL, "private, max-age=60".to_owned()),
        ],
        body,
    )
        .into_response())
}

/// Compute `ETag` from version and response body.
///
/// Uses MD5 hash truncated to 64 bits (16 hex chars) - sufficient for
/// cache invalidation with negligible collision probability.
fn compute_etag(version: &str, body: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(version.as_bytes());
    hasher.update(b":");
    hasher.update(body);
    format!("\"{}\"", &hex::encode(hasher.finalize())[..16])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_etag_includes_version() {
        let etag1 = compute_etag("1.0.0", b"content");
        let etag2 = compute_etag("1.0.1", b"content");

        assert_ne!(etag1, etag2);
    }

    #[test]
    fn test_compute_etag_includes_body() {
        let etag1 = compute_etag("1.0.0", b"content1");
        let etag2 = compute_etag("1.0.0", b"content2");

        assert_ne!(etag1, etag2);
    }

    #[test]
    fn test_compute_etag_format() {
        let etag = compute_etag("1.0.0", b"content");

        assert!(etag.starts_with('"'));
        assert!(etag.ends_with('"'));
        // 16 hex chars + 2 quotes = 18 total
        assert_eq!(etag.len(), 18);
    }
}
