//! Server error type.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use fsmd_content::ContentError;
use serde_json::json;

/// Request handling failure, answered with a JSON `500`.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// The resolver failed to read or parse content.
    #[error(transparent)]
    Content(#[from] ContentError),

    /// The blocking resolve task panicked or was cancelled.
    #[error("resolve task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// The response body could not be serialized.
    #[error("failed to serialize response: {0}")]
    Json(#[from] serde_json::Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");
        let body = Json(json!({ "error": self.to_string() }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use fsmd_storage::{StorageError, StorageErrorKind};

    use super::*;

    #[test]
    fn test_content_error_is_internal_server_error() {
        let err = ServerError::from(ContentError::from(StorageError::new(
            StorageErrorKind::PermissionDenied,
        )));

        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
