/// Private helper functions for text cleaning and field normalization
use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static WHITESPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Rating phrasings, tried in order: "4.5 out of 5", "4/5", "4 stars".
static RATING_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)(\d+(?:\.\d+)?)\s*out\s+of\s*5",
        r"(\d+(?:\.\d+)?)\s*/\s*5",
        r"(?i)(\d+(?:\.\d+)?)\s*stars?\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid regex"))
    .collect()
});

pub(super) const STAR_GLYPH: char = '★';

/// Call-to-action and widget chrome that never belongs in product prose.
pub const CTA_PATTERNS: [&str; 6] = [
    "please enter pin",
    "add to bag",
    "buy ",
    "style id",
    "please check",
    "check delivery",
];

pub(super) const MIN_DESCRIPTION_LINE_CHARS: usize = 15;
pub(super) const MAX_BREADCRUMB_CHARS: usize = 80;

pub(super) fn match_rating_patterns(text: &str) -> Option<f64> {
    RATING_PATTERNS
        .iter()
        .find_map(|re| re.captures(text))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

pub(super) fn count_star_glyphs(text: &str) -> usize {
    text.chars().filter(|c| *c == STAR_GLYPH).count()
}

pub(super) fn is_cta(line: &str) -> bool {
    let lower = line.to_lowercase();
    CTA_PATTERNS.iter().any(|p| lower.contains(p))
}

/// Delivery checker widgets: "Enter PIN code to check delivery".
pub(super) fn is_pin_widget(line: &str) -> bool {
    let lower = line.to_lowercase();
    lower.contains("pin")
        && (lower.contains("delivery") || lower.contains("pincode") || lower.contains("pin code"))
}

/// Longest line; the earliest one wins a tie.
pub(super) fn longest<'a>(lines: impl DoubleEndedIterator<Item = &'a str>) -> Option<&'a str> {
    lines.rev().max_by_key(|ln| ln.chars().count())
}

/// Decode HTML entities (named and numeric).
pub fn decode_html_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).to_string()
}

/// Normalize Unicode to NFC (Canonical Composition).
pub fn normalize_unicode(text: &str) -> String {
    text.nfc().collect::<String>()
}

/// Remove zero-width characters (U+200B, U+200C, U+200D, U+FEFF).
pub fn remove_zero_width_chars(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(*c, '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{FEFF}'))
        .collect()
}

/// Remove control characters except newlines and tabs.
pub fn remove_control_chars(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}

/// Collapse runs of whitespace to one space and trim.
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_REGEX.replace_all(text, " ").trim().to_string()
}
