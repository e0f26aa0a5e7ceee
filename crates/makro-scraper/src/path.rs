//! Key-chain lookups into a raw product detail document.
//!
//! A lookup never fails: whenever a segment is missing, the chain is empty,
//! or an intermediate value is not an object, [`resolve`] returns the
//! [`MISSING`] sentinel (an empty JSON string). Field extractors decide what
//! the sentinel means for their field.

use serde_json::Value;

/// Sentinel returned by [`resolve`] when a key chain cannot be followed.
pub static MISSING: Value = Value::String(String::new());

/// Ordered keys leading from the document root to one raw field.
pub type FieldPath = &'static [&'static str];

/// Follows `path` through nested objects in `document`.
///
/// The value at the end of the chain is returned as-is, including `null`,
/// `0` or `false`.
#[must_use]
pub fn resolve<'a>(document: &'a Value, path: &[&str]) -> &'a Value {
    if path.is_empty() {
        return &MISSING;
    }

    let mut current = document;
    for key in path {
        match current.as_object().and_then(|map| map.get(*key)) {
            Some(next) => current = next,
            None => {
                tracing::trace!(key, ?path, "path segment missing");
                return &MISSING;
            }
        }
    }
    current
}

/// JSON truthiness: `null`, `false`, `0`, `""`, `[]` and `{}` are falsy.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Non-empty string content. Numbers are rendered, since some identifiers
/// arrive as JSON numbers.
pub(crate) fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A JSON number. Strings are not coerced.
pub(crate) fn as_number(value: &Value) -> Option<f64> {
    value.as_f64()
}

/// A JSON number or a string holding one, e.g. `"6"` or `" 2.5 "`.
pub(crate) fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}
