use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::Json;

use crate::error::WorkspaceError;
use crate::models::{IndexRequest, ProjectMessage};
use crate::state::AppState;

/// POST /index/{project_id} - Run the indexing pipeline (or a dry run) and wait for it
///
/// The body is optional; an empty body indexes with defaults.
pub async fn run_indexing(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    body: Bytes,
) -> Result<Json<ProjectMessage>, WorkspaceError> {
    let req = parse_index_request(&body)?;

    let workspace = state.workspace.clone();
    let id = project_id.clone();
    let message = tokio::task::spawn_blocking(move || workspace.index(&id, &req)).await??;

    Ok(Json(ProjectMessage {
        project_id,
        message,
    }))
}

fn parse_index_request(body: &[u8]) -> Result<IndexRequest, WorkspaceError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(IndexRequest::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| WorkspaceError::BadRequest(format!("Invalid index request: {e}")))
}
