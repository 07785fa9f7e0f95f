//! Session cookie collection and candidate-token discovery.
//!
//! Responsibility:
//! - Gather `(name, value)` pairs from the structured cookie jar AND from a manual
//!   parse of the raw `Cookie` header(s). The two can disagree (duplicate names,
//!   values the jar refuses to parse), so both are scanned without deduplication.
//!   Duplicate-tolerant scanning must not hide a legitimate token.
//! - Keep only session cookie names; stitch chunked cookies (`name.0`, `name.1`, ...)
//!   back together in numeric order.
//! - Turn each value into zero or one candidate token via `payload`.

use std::collections::HashMap;
use std::sync::LazyLock;

use axum::http::{HeaderMap, header};
use axum_extra::extract::cookie::CookieJar;
use regex::{Regex, RegexSet};

use super::payload::extract_access_token_from_cookie_value;

static SESSION_COOKIE_NAMES: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"^sb-.+-auth-token$",
        r"^sb-.+-auth-token\.\d+$",
        r"^supabase-auth-token$",
        r"^supabase-auth-token\.\d+$",
    ])
    .expect("session cookie patterns are valid")
});

static CHUNK_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*)\.(\d+)$").expect("chunk pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCookie {
    pub name: String,
    pub value: String,
}

impl RawCookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One piece of a chunked cookie.
#[derive(Debug, Clone)]
struct CookieChunk<'a> {
    index: u64,
    value: &'a str,
}

pub fn is_session_cookie_name(name: &str) -> bool {
    SESSION_COOKIE_NAMES.is_match(name)
}

/// Manual `Cookie` header parse: split on `;`, trim, split at the first `=`.
///
/// Entries without a name (`=x`) or without `=` are skipped. Values are kept verbatim.
pub fn parse_cookie_header(raw: &str) -> Vec<RawCookie> {
    raw.split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| match entry.find('=') {
            Some(idx) if idx > 0 => Some(RawCookie::new(entry[..idx].trim(), &entry[idx + 1..])),
            _ => None,
        })
        .collect()
}

/// Cookies visible on a request, kept per source.
///
/// Sources are scanned independently: merging them would put every chunk of a
/// chunked cookie into its group twice and corrupt the stitched value.
#[derive(Debug, Clone, Default)]
pub struct RequestCookies {
    pub jar: Vec<RawCookie>,
    pub header: Vec<RawCookie>,
}

impl RequestCookies {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let jar = CookieJar::from_headers(headers)
            .iter()
            .map(|c| RawCookie::new(c.name(), c.value()))
            .collect();

        let mut parsed = Vec::new();
        for value in headers.get_all(header::COOKIE) {
            // Non-visible-ASCII headers are skipped; the jar applies the same rule.
            if let Ok(raw) = value.to_str() {
                parsed.extend(parse_cookie_header(raw));
            }
        }

        Self {
            jar,
            header: parsed,
        }
    }

    /// A single already-merged source.
    #[cfg(test)]
    pub fn from_raw(cookies: Vec<RawCookie>) -> Self {
        Self {
            jar: Vec::new(),
            header: cookies,
        }
    }

    /// Candidates from both sources, duplicates included.
    pub fn candidate_tokens(&self) -> Vec<String> {
        let mut tokens = get_candidate_tokens(&self.jar);
        tokens.extend(get_candidate_tokens(&self.header));
        tokens
    }
}

/// Candidate tokens from all session cookies; order is not meaningful.
pub fn get_candidate_tokens(cookies: &[RawCookie]) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut chunked: HashMap<&str, Vec<CookieChunk<'_>>> = HashMap::new();

    for cookie in cookies {
        if !is_session_cookie_name(&cookie.name) {
            continue;
        }

        if let Some(caps) = CHUNK_SUFFIX.captures(&cookie.name) {
            let (Some(base), Some(index)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            // Digit runs beyond u64 sort last.
            let index = index.as_str().parse::<u64>().unwrap_or(u64::MAX);
            chunked.entry(base.as_str()).or_default().push(CookieChunk {
                index,
                value: &cookie.value,
            });
            continue;
        }

        if let Some(token) = extract_access_token_from_cookie_value(&cookie.value) {
            tokens.push(token);
        }
    }

    for (_, mut chunks) in chunked {
        let stitched = stitch_chunks(&mut chunks);
        if let Some(token) = extract_access_token_from_cookie_value(&stitched) {
            tokens.push(token);
        }
    }

    tokens
}

/// Concatenate raw chunk values ordered by numeric suffix (`.2` before `.10`).
fn stitch_chunks(chunks: &mut [CookieChunk<'_>]) -> String {
    chunks.sort_by_key(|chunk| chunk.index);
    chunks.iter().map(|chunk| chunk.value).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn recognizes_session_cookie_names() {
        for name in [
            "sb-abcd-auth-token",
            "sb-abcd-auth-token.0",
            "sb-a.b-auth-token.12",
            "supabase-auth-token",
            "supabase-auth-token.3",
        ] {
            assert!(is_session_cookie_name(name), "{name}");
        }
        for name in [
            "sb-auth-token",
            "sb-abcd-auth-token.x",
            "sb-abcd-auth-token-code-verifier",
            "supabase-auth-token.",
            "session",
        ] {
            assert!(!is_session_cookie_name(name), "{name}");
        }
    }

    #[test]
    fn parses_raw_cookie_header() {
        let parsed = parse_cookie_header(" a=1; b = 2 ;=skip; novalue; c=x=y;;");
        assert_eq!(
            parsed,
            vec![
                RawCookie::new("a", "1"),
                RawCookie::new("b", " 2"),
                RawCookie::new("c", "x=y"),
            ]
        );
    }

    #[test]
    fn collects_from_jar_and_raw_header_without_dedup() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("a=1; a=2"));
        headers.append(header::COOKIE, HeaderValue::from_static("b=3"));

        let cookies = RequestCookies::from_headers(&headers);

        // The jar keeps one `a`; the raw parse keeps both.
        assert_eq!(cookies.jar.iter().filter(|c| c.name == "a").count(), 1);
        assert_eq!(
            cookies.header,
            vec![
                RawCookie::new("a", "1"),
                RawCookie::new("a", "2"),
                RawCookie::new("b", "3"),
            ]
        );
        assert!(cookies.jar.iter().any(|c| c.name == "b" && c.value == "3"));
    }

    #[test]
    fn chunked_cookie_is_found_in_each_source() {
        let mut headers = HeaderMap::new();
        headers.append(
            header::COOKIE,
            HeaderValue::from_static("sb-ref-auth-token.1=.ccc; sb-ref-auth-token.0=aaa.bbb"),
        );

        let tokens = RequestCookies::from_headers(&headers).candidate_tokens();
        assert_eq!(tokens, vec!["aaa.bbb.ccc".to_string(), "aaa.bbb.ccc".to_string()]);
    }

    #[test]
    fn ignores_non_session_cookies() {
        let cookies = vec![RawCookie::new("theme", "a.b.c")];
        assert!(get_candidate_tokens(&cookies).is_empty());
    }

    #[test]
    fn extracts_direct_cookie() {
        let cookies = vec![RawCookie::new("sb-ref-auth-token", "aaa.bbb.ccc")];
        assert_eq!(get_candidate_tokens(&cookies), vec!["aaa.bbb.ccc".to_string()]);
    }

    #[test]
    fn stitches_chunks_in_numeric_order() {
        let cookies = vec![
            RawCookie::new("sb-ref-auth-token.0", "AAA."),
            RawCookie::new("sb-ref-auth-token.2", "CCC"),
            RawCookie::new("sb-ref-auth-token.1", "BBB."),
        ];
        assert_eq!(get_candidate_tokens(&cookies), vec!["AAA.BBB.CCC".to_string()]);
    }

    #[test]
    fn chunk_order_is_numeric_not_lexicographic() {
        let mut chunks: Vec<CookieChunk<'_>> = (0..=10u64)
            .rev()
            .map(|index| CookieChunk {
                index,
                value: ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9", "X"][index as usize],
            })
            .collect();
        assert_eq!(stitch_chunks(&mut chunks), "0123456789X");

        let mut chunks = vec![
            CookieChunk { index: 0, value: "AAA" },
            CookieChunk { index: 2, value: "CCC" },
            CookieChunk { index: 1, value: "BBB" },
        ];
        assert_eq!(stitch_chunks(&mut chunks), "AAABBBCCC");
    }

    #[test]
    fn stitched_value_is_decoded_as_a_whole() {
        let json = urlencoding::encode("{\"access_token\":\"aaa.bbb.ccc\"}").into_owned();
        let (head, tail) = json.split_at(10);
        let cookies = vec![
            RawCookie::new("supabase-auth-token.1", tail),
            RawCookie::new("supabase-auth-token.0", head),
        ];
        assert_eq!(get_candidate_tokens(&cookies), vec!["aaa.bbb.ccc".to_string()]);
    }

    #[test]
    fn chunk_groups_are_kept_per_base_name() {
        let cookies = vec![
            RawCookie::new("sb-one-auth-token.0", "a.b"),
            RawCookie::new("sb-two-auth-token.0", "c.d"),
            RawCookie::new("sb-one-auth-token.1", ".x"),
        ];
        let mut tokens = get_candidate_tokens(&cookies);
        tokens.sort();
        assert_eq!(tokens, vec!["a.b.x".to_string(), "c.d".to_string()]);
    }

    #[test]
    fn duplicate_cookies_yield_every_candidate() {
        let cookies = vec![
            RawCookie::new("sb-ref-auth-token", "garbage"),
            RawCookie::new("sb-ref-auth-token", "aaa.bbb.ccc"),
        ];
        assert_eq!(get_candidate_tokens(&cookies), vec!["aaa.bbb.ccc".to_string()]);
    }
}
