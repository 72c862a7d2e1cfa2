use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path, State};
use axum::Json;

use crate::error::WorkspaceError;
use crate::models::{IncomingFile, UploadResponse};
use crate::state::AppState;

/// POST /upload_txt/{project_id} - Add multipart files to a project's input directory
///
/// Parts without a filename are skipped. A part whose body cannot be read is
/// reported as a failed file rather than failing the batch.
pub async fn upload_txt_files(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, WorkspaceError> {
    state.workspace.find(&project_id)?;

    let mut multipart =
        multipart.map_err(|e| WorkspaceError::BadRequest(e.body_text()))?;
    let mut files = Vec::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                // The stream cannot be resumed after a framing error
                if files.is_empty() {
                    return Err(WorkspaceError::BadRequest(e.body_text()));
                }
                tracing::warn!("Stopped reading upload for {project_id}: {e}");
                break;
            }
        };
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let contents = field
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| e.body_text());
        files.push(IncomingFile { filename, contents });
    }

    let total = files.len();
    let results = state.workspace.upload(&project_id, files)?;

    Ok(Json(UploadResponse {
        message: format!(
            "Processed {total} files. {} successful, {} failed.",
            results.successful.len(),
            results.failed.len()
        ),
        project_id,
        results,
    }))
}
