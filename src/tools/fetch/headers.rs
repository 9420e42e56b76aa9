use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};

use super::types::DEFAULT_USER_AGENT;

/// Header pairs a desktop browser sends on a top-level navigation.
const NAVIGATION_HEADERS: [(&str, &str); 8] = [
    ("accept", "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8"),
    ("accept-language", "en-US,en;q=0.9"),
    ("upgrade-insecure-requests", "1"),
    ("sec-fetch-dest", "document"),
    ("sec-fetch-mode", "navigate"),
    ("sec-fetch-site", "none"),
    ("sec-ch-ua-mobile", "?0"),
    ("sec-ch-ua-platform", "\"macOS\""),
];

/// Browser-like headers with the given User-Agent.
///
/// A User-Agent that is not a valid header value falls back to the default.
pub(super) fn browser_headers(user_agent: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();

    for (k, v) in NAVIGATION_HEADERS {
        headers.insert(HeaderName::from_static(k), HeaderValue::from_static(v));
    }

    let ua = HeaderValue::from_str(user_agent)
        .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_USER_AGENT));
    headers.insert(USER_AGENT, ua);

    headers
}
