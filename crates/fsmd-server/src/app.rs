//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
///
/// # Arguments
///
/// * `state` - Shared application state
/// * `request_timeout` - Time allowed for one request
pub(crate) fn create_router(state: Arc<AppState>, request_timeout: Duration) -> Router {
    let api_routes = Router::new()
        .route("/api/pages/", get(handlers::pages::get_root_page))
        .route("/api/pages/{*path}", get(handlers::pages::get_page));

    Router::new()
        .route("/healthz", get(handlers::site::healthz))
        .route("/robots.txt", get(handlers::site::robots_txt))
        .merge(api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(request_timeout))
                .layer(security::csp_layer())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use fsmd_content::{ContentResolver, ResolverConfig};
    use fsmd_storage::{MockStorage, StorageErrorKind};
    use pretty_assertions::assert_eq;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;

    fn site() -> MockStorage {
        MockStorage::new()
            .with_file("markdown/_index.md", "---\ntitle: Welcome\n---\n# Welcome\n")
            .with_file("markdown/docs/_index.md", "---\ntitle: Docs\n---\n")
            .with_file(
                "markdown/docs/intro.md",
                "---\ntitle: Intro\ndate: 2024-01-01\n---\nGetting started.\n",
            )
            .with_file(
                "markdown/docs/guide.md",
                "---\ntitle: Guide\ndate: 2024-02-01\n---\nThe guide.\n",
            )
    }

    fn router(storage: MockStorage) -> Router {
        let resolver = ContentResolver::new(Arc::new(storage), ResolverConfig::default());
        let state = Arc::new(AppState {
            resolver: Arc::new(resolver),
            robots_txt: "User-agent: *\nDisallow: /private\n".to_owned(),
            version: "test".to_owned(),
        });
        create_router(state, Duration::from_secs(5))
    }

    async fn get(router: Router, uri: &str) -> Response {
        router
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_healthz() {
        let response = get(router(site()), "/healthz").await;

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b".");
    }

    #[tokio::test]
    async fn test_robots_txt() {
        let response = get(router(site()), "/robots.txt").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"User-agent: *\nDisallow: /private\n");
    }

    #[tokio::test]
    async fn test_get_leaf_page() {
        let response = get(router(site()), "/api/pages/docs/intro").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(header::ETAG));
        assert_eq!(
            response.headers()[header::CACHE_CONTROL],
            "private, max-age=60"
        );
        let body = json(response).await;
        assert_eq!(body["title"], "Intro");
        assert_eq!(body["url"], "/docs/intro");
        assert_eq!(body["isFolder"], false);
        assert_eq!(body["backItem"], "/docs");
        assert_eq!(body["sitemap"][0]["title"], "Guide");
        assert_eq!(body["sitemap"][1]["isActive"], true);
        assert!(body["sitemap"][0].get("isActive").is_none());
    }

    #[tokio::test]
    async fn test_get_root_page() {
        let response = get(router(site()), "/api/pages/").await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = json(response).await;
        assert_eq!(body["title"], "Welcome");
        assert_eq!(body["sitemap"][0]["title"], "Home");
        assert_eq!(body["sitemap"][0]["isActive"], true);
    }

    #[tokio::test]
    async fn test_get_folder_page() {
        let response = get(router(site()), "/api/pages/docs").await;

        let body = json(response).await;
        assert_eq!(body["isFolder"], true);
        assert_eq!(body["indexSitemap"].as_array().map(Vec::len), Some(2));
        assert_eq!(body["backItem"], "");
    }

    #[tokio::test]
    async fn test_missing_page_is_not_found_with_sentinel_body() {
        let response = get(router(site()), "/api/pages/docs/missing").await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(!response.headers().contains_key(header::ETAG));
        let body = json(response).await;
        assert_eq!(body["title"], "Error");
        assert!(body["content"].as_str().unwrap().contains("404"));
    }

    #[tokio::test]
    async fn test_store_failure_is_internal_error() {
        let storage =
            site().with_error("markdown/docs/intro.md", StorageErrorKind::PermissionDenied);

        let response = get(router(storage), "/api/pages/docs/intro").await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json(response).await;
        assert!(body["error"].as_str().unwrap().contains("Permission denied"));
    }

    #[tokio::test]
    async fn test_etag_not_modified() {
        let router = router(site());

        let first = get(router.clone(), "/api/pages/docs/guide").await;
        let etag = first.headers()[header::ETAG].clone();
        let second = router
            .oneshot(
                Request::get("/api/pages/docs/guide")
                    .header(header::IF_NONE_MATCH, etag)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(second.status(), StatusCode::NOT_MODIFIED);
    }

    #[tokio::test]
    async fn test_security_headers() {
        let response = get(router(site()), "/healthz").await;

        assert_eq!(response.headers()["x-content-type-options"], "nosniff");
        assert_eq!(response.headers()["x-frame-options"], "DENY");
        assert!(response.headers().contains_key("content-security-policy"));
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let response = get(router(site()), "/nope").await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
