//! Request gate decision (core-only; no axum types).
//!
//! ALLOW when the path is public or any session cookie carries a live token,
//! otherwise REDIRECT_TO_LOGIN with a login handoff URL. Stateless per request.

use crate::config::HandoffConfig;
use crate::services::handoff::build_login_handoff_url;
use crate::services::session::{RequestCookies, has_live_session};

const PUBLIC_PATHS: [&str; 2] = ["/", "/logout"];
const PUBLIC_PREFIXES: [&str; 3] = ["/_next", "/favicon.ico", "/api"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    RedirectToLogin(String),
}

/// Everything the gate reads from a request.
#[derive(Debug, Clone)]
pub struct GateRequest<'a> {
    pub path: &'a str,
    /// Absolute URL of the request, used as the post-login return target.
    pub url: &'a str,
    pub cookies: &'a RequestCookies,
}

pub fn is_public_path(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path) || PUBLIC_PREFIXES.iter().any(|p| path.starts_with(p))
}

pub fn evaluate(config: &HandoffConfig, request: &GateRequest<'_>, now: i64) -> GateDecision {
    if is_public_path(request.path) || has_live_session(request.cookies, now) {
        return GateDecision::Allow;
    }
    GateDecision::RedirectToLogin(build_login_handoff_url(config, request.url))
}
