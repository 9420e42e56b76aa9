use regex::Regex;
use scraper::Html;
use serde_json::Value;
use std::sync::LazyLock;

use crate::selectors::{JSONLD_SELECTOR, META_SELECTOR, TITLE_SELECTOR};
use crate::tools::types::{Jsonld, Metadata};

static TRAILING_COMMA_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",(\s*[}\]])").expect("valid regex"));

/// A closing brace followed by the opening brace of the next object.
static FRAGMENT_BOUNDARY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\}\s*\{").expect("valid regex"));

pub(super) fn jsonld_script_texts(doc: &Html) -> Vec<String> {
    doc.select(&JSONLD_SELECTOR)
        .map(|el| el.text().collect::<String>())
        .filter(|raw| !raw.trim().is_empty())
        .collect()
}

pub(super) fn parse_jsonld_block(raw: &str) -> Jsonld {
    let text = raw.trim();
    if text.is_empty() {
        return Vec::new();
    }

    if let Some(value) = parse_lenient(text) {
        return flatten_jsonld(value);
    }

    split_fragments(text)
        .into_iter()
        .filter_map(parse_lenient)
        .flat_map(flatten_jsonld)
        .collect()
}

/// Strict parse, then one retry with trailing commas removed.
fn parse_lenient(text: &str) -> Option<Value> {
    serde_json::from_str::<Value>(text).ok().or_else(|| {
        let repaired = TRAILING_COMMA_REGEX.replace_all(text, "$1");
        serde_json::from_str::<Value>(&repaired).ok()
    })
}

/// Split text into `{...}` candidates, cutting at every `}` that is directly
/// followed (modulo whitespace) by `{`. The last candidate runs to the final `}`.
pub(super) fn split_fragments(text: &str) -> Vec<&str> {
    let mut fragments = Vec::new();
    let Some(mut start) = text.find('{') else {
        return fragments;
    };

    for boundary in FRAGMENT_BOUNDARY_REGEX.find_iter(text) {
        if boundary.start() < start {
            continue;
        }
        fragments.push(&text[start..=boundary.start()]);
        start = boundary.end() - 1;
    }

    if let Some(end) = text.rfind('}') {
        if end >= start {
            fragments.push(&text[start..=end]);
        }
    }

    fragments
}

fn flatten_jsonld(value: Value) -> Jsonld {
    match value {
        Value::Array(arr) => arr.into_iter().flat_map(flatten_jsonld).collect(),
        Value::Object(mut obj) => {
            let mut out = Vec::new();
            if let Some(graph) = obj.remove("@graph") {
                out.extend(flatten_jsonld(graph));
                obj.remove("@context");
                if !obj.is_empty() {
                    out.push(Value::Object(obj));
                }
            } else {
                out.push(Value::Object(obj));
            }
            out
        }
        _ => Vec::new(),
    }
}

/// Local name of a type: `https://schema.org/Product` and `schema:Product` are `Product`.
fn type_local_name(declared: &str) -> &str {
    let declared = declared.trim();
    declared
        .rsplit(['/', '#', ':'])
        .next()
        .unwrap_or(declared)
}

pub(super) fn entity_has_type(block: &Value, type_name: &str) -> bool {
    let Some(obj) = block.as_object() else {
        return false;
    };
    let declared = obj.get("@type").or_else(|| obj.get("type"));
    match declared {
        Some(Value::String(t)) => type_local_name(t).eq_ignore_ascii_case(type_name),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .any(|t| type_local_name(t).eq_ignore_ascii_case(type_name)),
        _ => false,
    }
}

pub(super) fn metadata_pairs(doc: &Html) -> Metadata {
    let mut tags = Vec::new();

    if let Some(el) = doc.select(&TITLE_SELECTOR).next() {
        let text = el.text().collect::<String>().trim().to_string();
        if !text.is_empty() {
            tags.push(("title".to_string(), text));
        }
    }

    for el in doc.select(&META_SELECTOR) {
        let key = el
            .value()
            .attr("name")
            .or_else(|| el.value().attr("property"));
        let value = el.value().attr("content");
        if let (Some(k), Some(v)) = (key, value) {
            if !v.trim().is_empty() {
                tags.push((k.to_string(), v.to_string()));
            }
        }
    }

    tags
}
