//! Access-token extraction from a single (possibly stitched) cookie value.
//!
//! Cookie values arrive in several shapes depending on the client library version:
//! - a bare JWT
//! - a JSON string, array (`[access_token, refresh_token, ...]`) or object
//!   (`{"access_token": ...}`)
//! - any of the above prefixed with `base64-` and base64 encoded
//! - all of the above percent-encoded
//!
//! Every decode step degrades to "use the previous value"; nothing here returns an
//! error to the caller.

use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde_json::Value;

const BASE64_PREFIX: &str = "base64-";

const LENIENT: GeneralPurposeConfig = GeneralPurposeConfig::new()
    .with_decode_padding_mode(DecodePaddingMode::Indifferent)
    .with_decode_allow_trailing_bits(true);
pub(super) const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

/// Shape of a decoded cookie payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CookiePayload {
    /// JSON string literal.
    PlainString(String),
    /// JSON array; holds the first element when it is a string.
    FirstOfSequence(Option<String>),
    /// JSON object with a string `access_token`.
    AccessTokenField(String),
    /// Not JSON, or JSON of any other shape.
    Unrecognized,
}

impl CookiePayload {
    pub fn classify(decoded: &str) -> Self {
        match serde_json::from_str::<Value>(decoded) {
            Ok(Value::String(s)) => Self::PlainString(s),
            Ok(Value::Array(items)) => match items.into_iter().next() {
                Some(Value::String(first)) => Self::FirstOfSequence(Some(first)),
                _ => Self::FirstOfSequence(None),
            },
            Ok(Value::Object(mut fields)) => match fields.remove("access_token") {
                Some(Value::String(token)) => Self::AccessTokenField(token),
                _ => Self::Unrecognized,
            },
            _ => Self::Unrecognized,
        }
    }
}

/// Extract a candidate access token from a raw cookie value.
///
/// Empty candidates are discarded.
pub fn extract_access_token_from_cookie_value(cookie_value: &str) -> Option<String> {
    let percent_decoded = decode_uri_component(cookie_value);
    let decoded = percent_decoded.trim();

    let payload = match decoded.strip_prefix(BASE64_PREFIX) {
        Some(encoded) => decode_base64_text(encoded).unwrap_or_else(|| decoded.to_string()),
        None => decoded.to_string(),
    };

    let token = match CookiePayload::classify(&payload) {
        CookiePayload::PlainString(token) | CookiePayload::AccessTokenField(token) => Some(token),
        CookiePayload::FirstOfSequence(first) => first,
        // Not a known JSON shape: keep it only if it looks like a dotted token.
        CookiePayload::Unrecognized => payload.contains('.').then_some(payload),
    };

    token.filter(|t| !t.is_empty())
}

/// Percent-decode, or return the input unchanged if it is malformed.
///
/// Malformed means a `%` not followed by two hex digits, or a result that is not UTF-8.
fn decode_uri_component(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let well_formed = bytes.iter().enumerate().all(|(i, b)| {
        *b != b'%'
            || (bytes.get(i + 1).is_some_and(u8::is_ascii_hexdigit)
                && bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit))
    });
    if !well_formed {
        return raw.to_string();
    }

    urlencoding::decode(raw)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

/// Standard alphabet first, then URL-safe; padding optional.
fn decode_base64_text(encoded: &str) -> Option<String> {
    let bytes = STANDARD_LENIENT
        .decode(encoded)
        .or_else(|_| URL_SAFE_LENIENT.decode(encoded))
        .ok()?;
    String::from_utf8(bytes).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const JWT: &str = "aaa.bbb.ccc";

    fn b64(s: &str) -> String {
        base64::engine::general_purpose::STANDARD.encode(s)
    }

    #[test]
    fn classifies_json_shapes() {
        assert_eq!(
            CookiePayload::classify("\"tok\""),
            CookiePayload::PlainString("tok".into())
        );
        assert_eq!(
            CookiePayload::classify("[\"tok\", \"refresh\"]"),
            CookiePayload::FirstOfSequence(Some("tok".into()))
        );
        assert_eq!(
            CookiePayload::classify("[1, \"tok\"]"),
            CookiePayload::FirstOfSequence(None)
        );
        assert_eq!(
            CookiePayload::classify("[]"),
            CookiePayload::FirstOfSequence(None)
        );
        assert_eq!(
            CookiePayload::classify("{\"access_token\":\"tok\",\"refresh_token\":\"r\"}"),
            CookiePayload::AccessTokenField("tok".into())
        );
        assert_eq!(
            CookiePayload::classify("{\"access_token\":42}"),
            CookiePayload::Unrecognized
        );
        assert_eq!(CookiePayload::classify("null"), CookiePayload::Unrecognized);
        assert_eq!(CookiePayload::classify("not json"), CookiePayload::Unrecognized);
    }

    #[test]
    fn bare_dotted_value_is_a_candidate() {
        assert_eq!(extract_access_token_from_cookie_value(JWT), Some(JWT.into()));
    }

    #[test]
    fn opaque_value_without_dot_is_dropped() {
        assert_eq!(extract_access_token_from_cookie_value("abc123"), None);
        assert_eq!(extract_access_token_from_cookie_value(""), None);
    }

    #[test]
    fn percent_encoded_json_object() {
        let raw = urlencoding::encode("{\"access_token\":\"aaa.bbb.ccc\"}").into_owned();
        assert_eq!(extract_access_token_from_cookie_value(&raw), Some(JWT.into()));
    }

    #[test]
    fn json_array_uses_first_element_only() {
        assert_eq!(
            extract_access_token_from_cookie_value("[\"aaa.bbb.ccc\",\"refresh\"]"),
            Some(JWT.into())
        );
        // No dotted fallback for arrays whose head is not a string.
        assert_eq!(
            extract_access_token_from_cookie_value("[null,\"aaa.bbb.ccc\"]"),
            None
        );
    }

    #[test]
    fn object_without_access_token_falls_back_to_dot_heuristic() {
        assert_eq!(
            extract_access_token_from_cookie_value("{\"token\":\"x\"}"),
            None
        );
        assert_eq!(
            extract_access_token_from_cookie_value("{\"token\":\"a.b\"}"),
            Some("{\"token\":\"a.b\"}".into())
        );
    }

    #[test]
    fn base64_prefixed_payloads() {
        let standard = format!("base64-{}", b64("{\"access_token\":\"aaa.bbb.ccc\"}"));
        assert_eq!(
            extract_access_token_from_cookie_value(&standard),
            Some(JWT.into())
        );

        // `{"access_token":"a.b.c","x":"??>>"}` in the URL-safe alphabet.
        let url_safe = "base64-eyJhY2Nlc3NfdG9rZW4iOiJhLmIuYyIsIngiOiI_Pz4-In0";
        assert_eq!(
            extract_access_token_from_cookie_value(url_safe),
            Some("a.b.c".into())
        );
    }

    #[test]
    fn invalid_base64_keeps_prefixed_string() {
        assert_eq!(
            extract_access_token_from_cookie_value("base64-!!!.???"),
            Some("base64-!!!.???".into())
        );
        assert_eq!(extract_access_token_from_cookie_value("base64-!!!"), None);
    }

    #[test]
    fn malformed_percent_encoding_uses_raw_value() {
        assert_eq!(decode_uri_component("a%zz.b"), "a%zz.b");
        assert_eq!(decode_uri_component("a%2"), "a%2");
        assert_eq!(decode_uri_component("%ff"), "%ff");
        assert_eq!(decode_uri_component("a%2Eb"), "a.b");
        assert_eq!(decode_uri_component("a+b"), "a+b");
    }

    #[test]
    fn empty_string_candidates_are_discarded() {
        assert_eq!(extract_access_token_from_cookie_value("\"\""), None);
        assert_eq!(extract_access_token_from_cookie_value("{\"access_token\":\"\"}"), None);
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(
            extract_access_token_from_cookie_value("%20aaa.bbb.ccc%20"),
            Some(JWT.into())
        );
    }
}
