//! Identifier-candidate extraction.
//!
//! Providers often embed the same underlying match identifier as a substring
//! of a longer composite token (`"abc123"`, `"123456C13A_1_3"`), so raw field
//! equality across providers is unreliable. Instead every maximal digit run
//! found in the configured fields is collected as a weak correlation key;
//! any overlap between two records' candidate sets is treated as an ID match
//! by the linker.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("digit-run pattern"));

/// Collect every maximal digit run found in the named fields of `record`.
///
/// Missing fields are skipped silently; null values contribute nothing.
/// Non-string values are rendered to their JSON text first, so numeric ids
/// (`123456`) and strings (`"abc123"`) both yield `"123456"` / `"123"`.
/// The runs from all fields are unioned into one ordered set.
pub fn extract_ids(record: &Value, fields: &[String]) -> BTreeSet<String> {
    let mut ids = BTreeSet::new();
    let Some(map) = record.as_object() else {
        return ids;
    };
    for field in fields {
        let Some(value) = map.get(field) else {
            continue;
        };
        let text = match value {
            Value::Null => continue,
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        for run in DIGIT_RUN.find_iter(&text) {
            ids.insert(run.as_str().to_string());
        }
    }
    ids
}
