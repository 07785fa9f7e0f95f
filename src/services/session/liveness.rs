//! Structural JWT check: three segments, decodable claims, `sub` present, `exp` in the future.
//!
//! NOTE:
//! - The signature is NOT verified. This only filters dead or garbage cookies at the
//!   edge; the auth service establishes trust on every subsequent call.

use base64::Engine as _;
use serde::Deserialize;
use serde_json::Value;

use super::payload::STANDARD_LENIENT;

/// Claims required for a token to count as a live session.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenClaims {
    pub exp: f64,
    pub sub: String,
}

/// Decode the payload segment of a `header.payload.signature` token.
pub fn decode_claims(token: &str) -> Option<TokenClaims> {
    let segments: Vec<&str> = token.split('.').collect();
    let [_, payload, _] = segments.as_slice() else {
        return None;
    };

    let bytes = base64url_decode(payload)?;
    // Objects only; serde would otherwise accept a JSON array positionally.
    let value: Value = serde_json::from_slice(&bytes).ok()?;
    if !value.is_object() {
        return None;
    }
    let claims: TokenClaims = serde_json::from_value(value).ok()?;
    if claims.sub.is_empty() {
        return None;
    }
    Some(claims)
}

/// True when `token` is JWT-shaped and `exp` is strictly after `now` (unix seconds).
pub fn is_jwt_like_and_not_expired(token: &str, now: i64) -> bool {
    decode_claims(token).is_some_and(|claims| claims.exp > now as f64)
}

/// base64url or standard alphabet (mixed is fine), padding optional, trailing bits ignored.
fn base64url_decode(segment: &str) -> Option<Vec<u8>> {
    let normalized: String = segment
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    STANDARD_LENIENT.decode(normalized).ok()
}
