/*
 * Responsibility
 * - GET / (public landing; the console UI itself is served elsewhere)
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn home() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({"service": env!("CARGO_PKG_NAME"), "status": "ok"})),
    )
}
