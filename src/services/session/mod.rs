//! Session detection from request cookies.
//!
//! `cookies` finds candidate tokens, `payload` decodes cookie values, `liveness`
//! decides whether a candidate is a usable (well-formed, unexpired) token.

pub mod cookies;
pub mod liveness;
pub mod payload;

pub use cookies::RequestCookies;
pub use liveness::is_jwt_like_and_not_expired;

/// True if any session cookie carries a live token.
pub fn has_live_session(cookies: &RequestCookies, now: i64) -> bool {
    cookies
        .candidate_tokens()
        .iter()
        .any(|token| is_jwt_like_and_not_expired(token, now))
}
