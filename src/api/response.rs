/*
 * Responsibility
 * - Shared response builders for handlers and middleware
 */
use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::error::AppError;

/// 307 with `Location`; method and body are preserved by the client.
///
/// Unlike `axum::response::Redirect`, an unrepresentable location is an error, not a panic.
pub fn temporary_redirect(location: &str) -> Result<Response, AppError> {
    let value = HeaderValue::from_str(location)?;
    Ok((StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, value)]).into_response())
}
