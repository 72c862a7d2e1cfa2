use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::WorkspaceError;
use crate::models::{CreateProjectRequest, ProjectList, ProjectMessage};
use crate::state::AppState;

/// POST /create_project - Create a project directory, seed its input and configure the toolkit
pub async fn create_project(
    State(state): State<AppState>,
    payload: Result<Json<CreateProjectRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ProjectMessage>), WorkspaceError> {
    let Json(req) = payload?;

    // `graphrag init` is a child process; keep it off the async workers
    let workspace = state.workspace.clone();
    let config = state.config.clone();
    let id = tokio::task::spawn_blocking(move || workspace.create(&req, &config.fallbacks))
        .await??;

    Ok((
        StatusCode::CREATED,
        Json(ProjectMessage {
            project_id: id.to_string(),
            message: "Project created successfully.".to_string(),
        }),
    ))
}

/// DELETE /project/{project_id} - Remove a project and all of its data
pub async fn delete_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> Result<Json<ProjectMessage>, WorkspaceError> {
    state.workspace.delete(&project_id)?;
    Ok(Json(ProjectMessage {
        project_id,
        message: "Project deleted successfully.".to_string(),
    }))
}

/// GET /projects - List every project directory
pub async fn list_projects(
    State(state): State<AppState>,
) -> Result<Json<ProjectList>, WorkspaceError> {
    let projects = state.workspace.list()?;
    Ok(Json(ProjectList { projects }))
}
