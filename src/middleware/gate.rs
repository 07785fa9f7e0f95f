//! Request gate: pass authenticated (or public) requests through, send the rest to
//! the auth application's login page with a safe return URL.
//!
//! The decision itself lives in `services::gate`; this module only adapts axum
//! requests to it and turns a redirect decision into a 307.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, Uri, header},
    middleware::{self, Next},
    response::Response,
};
use url::Url;

use crate::api::response::temporary_redirect;
use crate::error::AppError;
use crate::services::gate::{self, GateDecision, GateRequest};
use crate::services::session::RequestCookies;
use crate::state::AppState;

/// Put the gate in front of every route of `router`.
///
/// ```ignore
/// let router = api::routes();
/// let router = middleware::gate::apply(router, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, gate_middleware))
}

async fn gate_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path().to_string();
    let url = request_url(req.headers(), req.uri(), &state.handoff.app_url);
    let cookies = RequestCookies::from_headers(req.headers());
    let now = chrono::Utc::now().timestamp();

    let request = GateRequest {
        path: &path,
        url: &url,
        cookies: &cookies,
    };

    match gate::evaluate(&state.handoff, &request, now) {
        GateDecision::Allow => {
            tracing::debug!(path = %path, "gate: allow");
            Ok(next.run(req).await)
        }
        GateDecision::RedirectToLogin(location) => {
            tracing::info!(path = %path, "gate: no live session, redirecting to login");
            temporary_redirect(&location)
        }
    }
}

/// Absolute URL the client used.
///
/// Proxy headers win over `Host`; without any host header the request target is
/// laid over `app_url`. A forged host only makes the return URL fail the allowlist.
fn request_url(headers: &HeaderMap, uri: &Uri, app_url: &Url) -> String {
    let host = headers
        .get("x-forwarded-host")
        .or_else(|| headers.get(header::HOST))
        .and_then(|v| v.to_str().ok())
        .map(first_value)
        .filter(|h| !h.is_empty());

    let path_and_query = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    let Some(host) = host else {
        let mut url = app_url.clone();
        url.set_path(uri.path());
        url.set_query(uri.query());
        return url.to_string();
    };

    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .map(first_value)
        .filter(|s| !s.is_empty())
        .unwrap_or(app_url.scheme());

    format!("{}://{}{}", scheme, host, path_and_query)
}

// Proxies may append: `a, b` → `a`.
fn first_value(raw: &str) -> &str {
    raw.split(',').next().unwrap_or_default().trim()
}
