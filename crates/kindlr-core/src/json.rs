//! JSON content detection.

use serde_json::Value;

/// Parse `content` as JSON, keeping it only if it is a non-empty object or a
/// non-empty array.
///
/// Bare primitives, `{}`, `[]` and malformed input all return `None`.
pub fn parse_json_content(content: &str) -> Option<Value> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<Value>(trimmed).ok()? {
        Value::Object(map) if !map.is_empty() => Some(Value::Object(map)),
        Value::Array(items) if !items.is_empty() => Some(Value::Array(items)),
        _ => None,
    }
}

/// True when `content` is a non-empty JSON object or array.
pub fn is_json_content(content: &str) -> bool {
    parse_json_content(content).is_some()
}

/// Number of top-level keys (objects) or elements (arrays), 0 otherwise.
pub fn json_key_count(value: &Value) -> usize {
    match value {
        Value::Object(map) => map.len(),
        Value::Array(items) => items.len(),
        _ => 0,
    }
}
