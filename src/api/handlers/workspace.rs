/*
 * Responsibility
 * - GET /{workspace_slug}, GET /{workspace_slug}/{*path}
 * - Workspace entry routes; only reachable with a live session (gate)
 * - Paths the gate treats as public (e.g. /api/x, /apiary, /_next/x) are not
 *   workspaces and answer 404, so the catch-all never serves them ungated
 */
use axum::{Json, extract::Path, http::Uri};
use serde::Serialize;

use crate::error::AppError;
use crate::services::gate::is_public_path;

#[derive(Debug, Serialize)]
pub struct WorkspaceResponse {
    pub workspace: String,
    pub path: String,
}

pub async fn workspace_home(
    uri: Uri,
    Path(workspace_slug): Path<String>,
) -> Result<Json<WorkspaceResponse>, AppError> {
    ensure_gated(&uri)?;
    Ok(Json(WorkspaceResponse {
        workspace: workspace_slug,
        path: "/".to_string(),
    }))
}

pub async fn workspace_page(
    uri: Uri,
    Path((workspace_slug, path)): Path<(String, String)>,
) -> Result<Json<WorkspaceResponse>, AppError> {
    ensure_gated(&uri)?;
    Ok(Json(WorkspaceResponse {
        workspace: workspace_slug,
        path: format!("/{}", path.trim_start_matches('/')),
    }))
}

fn ensure_gated(uri: &Uri) -> Result<(), AppError> {
    if is_public_path(uri.path()) {
        return Err(AppError::NotFound);
    }
    Ok(())
}
