//! Site-wide static endpoints.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;

use crate::state::AppState;

/// Handle GET /healthz.
pub(crate) async fn healthz() -> &'static str {
    "."
}

/// Handle GET /robots.txt.
pub(crate) async fn robots_txt(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        state.robots_txt.clone(),
    )
}
