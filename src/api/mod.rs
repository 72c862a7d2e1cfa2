//! Axum handlers for the project lifecycle API.

pub mod index;
pub mod projects;
pub mod query;
pub mod upload;

use axum::extract::rejection::JsonRejection;
use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::error::WorkspaceError;
use crate::state::AppState;

/// Build the HTTP router over `state`.
pub fn router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes();

    Router::new()
        .route("/create_project", post(projects::create_project))
        .route("/index/{project_id}", post(index::run_indexing))
        .route("/query/{project_id}", post(query::run_query))
        .route("/upload_txt/{project_id}", post(upload::upload_txt_files))
        .route("/project/{project_id}", delete(projects::delete_project))
        .route("/projects", get(projects::list_projects))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

impl From<JsonRejection> for WorkspaceError {
    fn from(rejection: JsonRejection) -> Self {
        WorkspaceError::BadRequest(rejection.body_text())
    }
}
