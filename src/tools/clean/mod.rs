//! Field normalizer: ratings, descriptions, breadcrumbs, images and text.

mod utils;

pub use utils::CTA_PATTERNS;
use utils::*;

use serde_json::Value;
use url::Url;

/// Clean text.
///
/// Performs the following operations in order:
/// 1. Decode HTML entities (`&amp;` → `&`, `&#39;` → `'`)
/// 2. Normalize Unicode to NFC (canonical composition)
/// 3. Remove zero-width characters
/// 4. Remove control characters (except newlines/tabs)
/// 5. Normalize whitespace (collapse multiple spaces, trim)
///
/// # Examples
/// ```
/// use shelfscrape::tools::clean::clean_text;
///
/// let dirty = "Oak &amp; Walnut\n   Side   Table";
/// assert_eq!(clean_text(dirty), "Oak & Walnut Side Table");
/// ```
pub fn clean_text(text: &str) -> String {
    let mut result = decode_html_entities(text);
    result = normalize_unicode(&result);
    result = remove_zero_width_chars(&result);
    result = remove_control_chars(&result);
    normalize_whitespace(&result)
}

/// Parse a free-text rating.
///
/// Recognizes, in order, `"<n> out of 5"`, `"<n>/5"` and `"<n> star(s)"`.
/// Without a numeric match, the number of `★` glyphs is the rating.
///
/// # Examples
/// ```
/// use shelfscrape::tools::clean::parse_rating;
///
/// assert_eq!(parse_rating("4.5 out of 5"), Some(4.5));
/// assert_eq!(parse_rating("4/5"), Some(4.0));
/// assert_eq!(parse_rating("★★★★"), Some(4.0));
/// assert_eq!(parse_rating(""), None);
/// ```
pub fn parse_rating(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Some(value) = match_rating_patterns(text) {
        return Some(value);
    }
    match count_star_glyphs(text) {
        0 => None,
        n => Some(n as f64),
    }
}

/// Format a rating as `"<value>/5"`; whole values keep one decimal (`4.0/5`).
pub fn format_rating(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}/5")
    } else {
        format!("{value}/5")
    }
}

/// Read a rating out of a structured-data value.
///
/// Finite numbers and numeric strings are taken as-is, other strings go
/// through [`parse_rating`]. `"NaN"` and `"inf"` are not ratings.
pub fn rating_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .or_else(|| parse_rating(s)),
        _ => None,
    }
}

/// Reduce noisy description text to its single most informative line.
///
/// Lines shorter than 15 characters, call-to-action lines and delivery
/// checker lines are discarded and the longest survivor is returned. If
/// nothing survives, the longest non-CTA line of the input is used instead.
pub fn clean_description(text: &str) -> String {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|ln| !ln.is_empty())
        .collect();

    let good = lines.iter().copied().filter(|ln| {
        ln.chars().count() >= MIN_DESCRIPTION_LINE_CHARS && !is_cta(ln) && !is_pin_widget(ln)
    });
    if let Some(best) = longest(good) {
        return best.to_string();
    }

    longest(lines.iter().copied().filter(|ln| !is_cta(ln)))
        .map(str::to_string)
        .unwrap_or_default()
}

/// Clean a slash-joined breadcrumb path.
///
/// Segments that are empty, longer than 80 characters or calls to action
/// are dropped.
///
/// # Examples
/// ```
/// use shelfscrape::tools::clean::clean_breadcrumbs;
///
/// assert_eq!(clean_breadcrumbs("Home / Kitchen // Add to bag"), "Home/Kitchen");
/// ```
pub fn clean_breadcrumbs(path: &str) -> String {
    path.split('/')
        .map(str::trim)
        .filter(|seg| {
            !seg.is_empty() && seg.chars().count() <= MAX_BREADCRUMB_CHARS && !is_cta(seg)
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Drop the last crumb when it merely repeats the product name.
pub fn drop_trailing_name(mut crumbs: Vec<String>, name: &str) -> Vec<String> {
    let name = name.trim();
    if !name.is_empty() && crumbs.last().is_some_and(|last| last.trim() == name) {
        crumbs.pop();
    }
    crumbs
}

/// Resolve a possibly relative URL against the page it was found on.
///
/// Only http(s) results are returned.
pub fn resolve_url(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    let url = Url::parse(href).or_else(|_| base.join(href)).ok()?;
    matches!(url.scheme(), "http" | "https").then(|| url.to_string())
}

/// Merge image candidates into one ordered, de-duplicated list.
///
/// Sources are given in priority order (structured data, Open Graph, raw
/// `<img>` tags); relative URLs resolve against `base`.
pub fn collect_images(base: &Url, sources: &[Vec<String>]) -> Vec<String> {
    crate::dedupe!(sources.iter().flatten(), |src: &String| resolve_url(base, src)
        .unwrap_or_default())
}
