//! Cross-application handoff URLs (login / logout at the auth application).
//!
//! Responsibility:
//! - Build `{auth_app_url}/{login|logout}?redirect=<percent-encoded target>`.
//! - Resolve the return target through the redirect guard, make it absolute
//!   against this application's URL, and re-validate before embedding it.
//!
//! `build_auth_route_url` does not validate its input; the `*_handoff_url`
//! functions are the entry points for request handling.

use std::fmt;

use url::Url;

use crate::config::HandoffConfig;
use crate::services::redirect::{get_safe_redirect_url, is_valid_redirect_url};

const REDIRECT_PARAM: &str = "redirect";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRoute {
    Login,
    Logout,
}

impl AuthRoute {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthRoute::Login => "login",
            AuthRoute::Logout => "logout",
        }
    }
}

impl fmt::Display for AuthRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `{auth_app_url}/{route}` with a single `redirect` query parameter.
///
/// The route replaces any path on `auth_app_url`.
pub fn build_auth_route_url(auth_app_url: &Url, route: AuthRoute, redirect_url: &str) -> String {
    let mut url = auth_app_url.clone();
    url.set_path(&format!("/{route}"));
    url.set_fragment(None);
    url.query_pairs_mut()
        .clear()
        .append_pair(REDIRECT_PARAM, redirect_url);
    url.to_string()
}

/// Login handoff for a request that failed the session check.
///
/// `request_url` is the absolute URL the caller was trying to reach.
pub fn build_login_handoff_url(config: &HandoffConfig, request_url: &str) -> String {
    let target = resolve_return_target(config, request_url);
    build_auth_route_url(&config.auth_app_url, AuthRoute::Login, &target)
}

/// Logout handoff; `redirect_url` is the optional `redirect` query value.
pub fn build_logout_handoff_url(config: &HandoffConfig, redirect_url: Option<&str>) -> String {
    let candidate = redirect_url.map(str::trim).unwrap_or_default();
    let target = resolve_return_target(config, candidate);
    build_auth_route_url(&config.auth_app_url, AuthRoute::Logout, &target)
}

/// This application's root, used whenever a candidate is rejected.
pub fn fallback_redirect(config: &HandoffConfig) -> String {
    let mut root = config.app_url.clone();
    root.set_path("/");
    root.set_query(None);
    root.set_fragment(None);
    root.to_string()
}

/// Two-stage resolution: safe candidate → absolute against `app_url` → re-check.
fn resolve_return_target(config: &HandoffConfig, candidate: &str) -> String {
    let fallback = fallback_redirect(config);
    let safe = get_safe_redirect_url(candidate, &fallback, &config.allowed_domains);

    let absolute = if safe.starts_with('/') {
        match config.app_url.join(&safe) {
            Ok(url) => url.to_string(),
            Err(_) => return fallback,
        }
    } else {
        safe
    };

    if is_valid_redirect_url(&absolute, &config.allowed_domains) {
        absolute
    } else {
        fallback
    }
}
