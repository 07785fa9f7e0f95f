//! Open-redirect guard for return URLs handed to the auth application.
//!
//! Responsibility:
//! - Decide whether a redirect candidate may be followed (`is_valid_redirect_url`).
//! - Resolve a candidate to itself or a caller-supplied fallback (`get_safe_redirect_url`).
//!
//! Allowlist matching:
//! - `host:port` entries require an exact hostname and port match.
//! - bare `host` entries match the host itself and any subdomain (`*.host`).
//!
//! Note: subdomain matching is a plain suffix test on `.` + entry, so an entry as
//! short as `com` admits every `*.com` host. Operators must list specific domains.

use url::Url;

const BLOCKED_SCHEMES: [&str; 2] = ["javascript:", "data:"];

/// Root-relative path (`/x`), never protocol-relative (`//host`).
fn is_root_relative(candidate: &str) -> bool {
    candidate.starts_with('/') && !candidate.starts_with("//")
}

/// Returns true if `candidate` is safe to redirect to.
///
/// Relative paths are accepted regardless of `allowed_domains`; absolute URLs must
/// be http(s) and match an allowlist entry. An empty allowlist rejects every
/// absolute URL.
pub fn is_valid_redirect_url(candidate: &str, allowed_domains: &[String]) -> bool {
    if candidate.is_empty() {
        return false;
    }

    let lowered = candidate.trim().to_lowercase();
    if BLOCKED_SCHEMES
        .iter()
        .any(|scheme| lowered.starts_with(scheme))
    {
        return false;
    }

    if is_root_relative(candidate) {
        return true;
    }

    let Ok(parsed) = Url::parse(candidate) else {
        return false;
    };
    if !matches!(parsed.scheme(), "http" | "https") {
        return false;
    }

    let Some(hostname) = parsed.host_str().map(str::to_lowercase) else {
        return false;
    };
    // Default ports are elided by the parser, so `http://host:80` has no port here.
    let port = parsed.port().map(|p| p.to_string()).unwrap_or_default();

    allowed_domains
        .iter()
        .any(|entry| domain_matches(&hostname, &port, &entry.to_lowercase()))
}

fn domain_matches(hostname: &str, port: &str, entry: &str) -> bool {
    if entry.contains(':') {
        let mut parts = entry.split(':');
        let entry_host = parts.next().unwrap_or_default();
        let entry_port = parts.next().unwrap_or_default();
        return hostname == entry_host && port == entry_port;
    }

    hostname == entry
        || hostname
            .strip_suffix(entry)
            .is_some_and(|rest| rest.ends_with('.'))
}

/// Resolve `candidate` to itself when safe, else to `fallback`.
///
/// Root-relative paths are returned unchanged without consulting the allowlist:
/// they cannot leave the current origin.
pub fn get_safe_redirect_url(candidate: &str, fallback: &str, allowed_domains: &[String]) -> String {
    if candidate.is_empty() {
        return fallback.to_string();
    }
    if is_root_relative(candidate) {
        return candidate.to_string();
    }
    if is_valid_redirect_url(candidate, allowed_domains) {
        candidate.to_string()
    } else {
        fallback.to_string()
    }
}
