//! Common types shared across tools

use serde_json::Value;

/// Flattened JSON-LD entities found on a page.
pub type Jsonld = Vec<Value>;

/// Metadata key-value pairs (`<title>`, `meta[name]`, `meta[property]`).
pub type Metadata = Vec<(String, String)>;
