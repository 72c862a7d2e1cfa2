use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::models::UploadResults;

/// Failures surfaced by workspace operations.
#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    #[error("Project not found.")]
    NotFound,
    /// The project exists but has no output directory yet.
    #[error("Project has not been indexed yet.")]
    NotIndexed,
    #[error("{0}")]
    BadRequest(String),
    #[error("No files could be uploaded.")]
    UploadRejected(UploadResults),
    #[error("{0}")]
    Internal(String),
}

impl WorkspaceError {
    /// Wrap a lower-level error with an operation prefix, keeping the full cause chain.
    pub fn internal(prefix: &str, err: anyhow::Error) -> Self {
        WorkspaceError::Internal(format!("{prefix}: {err:#}"))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            WorkspaceError::NotFound => StatusCode::NOT_FOUND,
            WorkspaceError::NotIndexed
            | WorkspaceError::BadRequest(_)
            | WorkspaceError::UploadRejected(_) => StatusCode::BAD_REQUEST,
            WorkspaceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WorkspaceError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match self {
            WorkspaceError::UploadRejected(results) => serde_json::json!({
                "message": "No files could be uploaded.",
                "results": results,
            }),
            other => serde_json::Value::String(other.to_string()),
        };
        (status, Json(serde_json::json!({ "detail": detail }))).into_response()
    }
}

impl From<tokio::task::JoinError> for WorkspaceError {
    fn from(err: tokio::task::JoinError) -> Self {
        WorkspaceError::Internal(format!("Worker task failed: {err}"))
    }
}
