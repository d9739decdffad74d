//! Field lookup with placeholder fallback.

use serde_json::Value as JsonValue;
use whodunit_error::MissingFieldError;

/// Generic placeholder for a missing value.
pub const UNKNOWN: &str = "未知";

/// Placeholder for a missing script title.
pub const UNTITLED: &str = "未定标题";

/// Read `key` from `payload` as display text.
///
/// Strings are returned as-is, other values as compact JSON. A missing or
/// null field yields `placeholder`.
pub fn text_field(payload: &JsonValue, key: &str, placeholder: &str) -> String {
    match payload.get(key) {
        Some(value) if !value.is_null() => display_value(value),
        _ => {
            let err = MissingFieldError::new(key);
            tracing::debug!(error = %err, placeholder, "Substituting placeholder");
            placeholder.to_string()
        }
    }
}

/// Display form of a scalar or nested value.
pub(crate) fn display_value(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}
