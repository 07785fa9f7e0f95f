/*
 * Responsibility
 * - GET|POST /logout
 * - Hand the browser to the auth application's /logout with a vetted return target
 * - Session state lives in the auth application; nothing is cleared here
 */
use axum::{
    extract::{RawQuery, State},
    response::Response,
};

use crate::api::response::temporary_redirect;
use crate::error::AppError;
use crate::services::handoff::build_logout_handoff_url;
use crate::state::AppState;

pub async fn logout(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Response, AppError> {
    let redirect = query.as_deref().and_then(redirect_param);
    let location = build_logout_handoff_url(&state.handoff, redirect.as_deref());

    tracing::info!(requested = ?redirect, "logout: handing off to auth app");
    temporary_redirect(&location)
}

// First `redirect` value; malformed escapes are kept as-is rather than rejected.
fn redirect_param(query: &str) -> Option<String> {
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "redirect")
        .map(|(_, value)| value.into_owned())
}
