//! Shared Macros

/// Evaluate fallback strategies in order, returning the first non-empty `String`.
///
/// Later arms are only evaluated when every earlier arm came back empty, so
/// DOM scans behind a structured-data hit never run.
#[macro_export]
macro_rules! first_non_empty {
    ($($strategy:expr),+ $(,)?) => {{
        let mut found = String::new();
        $(
            if found.is_empty() {
                found = $strategy;
            }
        )+
        found
    }};
}

/// Deduplicate a collection while preserving first-seen order.
#[macro_export]
macro_rules! dedupe {
    // Deduplication
    ($list:expr) => {{
        let mut seen = std::collections::HashSet::new();
        let mut result = Vec::new();
        for item in $list {
            if seen.insert(item.clone()) {
                result.push(item);
            }
        }
        result
    }};
    // Deduplication after mapping; empty results are dropped
    ($list:expr, $fn:expr) => {{
        let mut seen = std::collections::HashSet::new();
        let mut result = Vec::new();
        for item in $list {
            let processed = $fn(item);
            if !processed.is_empty() && seen.insert(processed.clone()) {
                result.push(processed);
            }
        }
        result
    }};
}
