/*
 * Responsibility
 * - URL structure of the console edge
 * - Public: /, /logout and the /api prefix; everything else is behind the gate (applied in app.rs)
 */
use axum::{Router, routing::get};

use crate::state::AppState;

use crate::api::handlers::{
    health::health,
    home::home,
    logout::logout,
    security_headers::security_headers,
    workspace::{workspace_home, workspace_page},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/logout", get(logout).post(logout))
        .route("/api/health", get(health))
        .route("/api/security-headers", get(security_headers))
        .route("/{workspace_slug}", get(workspace_home))
        .route("/{workspace_slug}/{*path}", get(workspace_page))
}
