//! Structured data reader: JSON-LD entities and page metadata.

mod utils;

use utils::*;

use crate::tools::types::{Jsonld, Metadata};
use scraper::Html;
use serde_json::Value;

/// Scrape every JSON-LD entity from raw HTML.
pub fn scrape_jsonld(html: &str) -> Jsonld {
    read_jsonld(&Html::parse_document(html))
}

/// Collect JSON-LD entities from a parsed document.
///
/// Each block is parsed strictly first. Blocks that fail are repaired
/// (trailing commas) and, failing that, split into `{...}` fragments that
/// are parsed one by one. Fragments that still fail are dropped. Arrays
/// and `@graph` containers are flattened so the result is a flat list of
/// entity objects in document order.
pub fn read_jsonld(doc: &Html) -> Jsonld {
    jsonld_script_texts(doc)
        .iter()
        .flat_map(|raw| parse_jsonld_block(raw))
        .collect()
}

/// Find the first entity whose `@type` (or `type`) matches `type_name`.
///
/// Matching ignores ASCII case. The type may be a string or a list of
/// strings; any element matching is a hit.
///
/// ## Examples
/// ```
/// use shelfscrape::tools::scrape::find_entity_of_type;
///
/// let blocks = vec![
///     serde_json::json!({"@type": "Organization", "name": "Shop"}),
///     serde_json::json!({"@type": ["Product", "Thing"], "name": "Mug"}),
/// ];
/// let product = find_entity_of_type(&blocks, "product").unwrap();
/// assert_eq!(product["name"], "Mug");
/// assert!(find_entity_of_type(&blocks, "BreadcrumbList").is_none());
/// ```
pub fn find_entity_of_type<'a>(blocks: &'a [Value], type_name: &str) -> Option<&'a Value> {
    blocks
        .iter()
        .find(|block| entity_has_type(block, type_name))
}

/// Scrape metadata pairs from raw HTML.
pub fn scrape_metadata(html: &str) -> Metadata {
    read_metadata(&Html::parse_document(html))
}

/// Collect `<title>` plus every `meta[name]` / `meta[property]` with content.
pub fn read_metadata(doc: &Html) -> Metadata {
    metadata_pairs(doc)
}

/// Find the first non-empty value for any of the given keys, in key order.
pub fn find_metadata_value(pairs: &[(String, String)], keys: &[&str]) -> Option<String> {
    for key in keys {
        for (k, v) in pairs {
            if k.eq_ignore_ascii_case(key) {
                let cleaned = v.trim();
                if !cleaned.is_empty() {
                    return Some(cleaned.to_string());
                }
            }
        }
    }
    None
}
