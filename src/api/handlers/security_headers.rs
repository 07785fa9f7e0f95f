/*
 * Responsibility
 * - GET /api/security-headers
 * - Probe endpoint for checking that the security header layer is applied;
 *   the headers themselves are set by middleware::security_headers
 */
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SecurityHeadersProbe {
    pub message: &'static str,
    pub timestamp: String,
}

pub async fn security_headers() -> Json<SecurityHeadersProbe> {
    Json(SecurityHeadersProbe {
        message: "Security headers test endpoint",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
