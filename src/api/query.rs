use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;

use crate::error::WorkspaceError;
use crate::models::{QueryRequest, QueryResponse};
use crate::state::AppState;

/// POST /query/{project_id} - Local or global search over an indexed project
pub async fn run_query(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<QueryResponse>, WorkspaceError> {
    let Json(req) = payload?;

    let workspace = state.workspace.clone();
    let response =
        tokio::task::spawn_blocking(move || workspace.query(&project_id, &req)).await??;

    Ok(Json(response))
}
