use serde_json::Value;

mod counts;
mod record;
mod severity;
pub use counts::ViolationCounts;
pub use record::{Location, ViolationRecord};
pub use severity::Severity;

/// Rendering used for absent parts of a record id.
pub const UNDEFINED: &str = "undefined";

/// Coerces a loose JSON value into display text.
///
/// Strings pass through unquoted, `null` becomes `None`, and anything else
/// is rendered as compact JSON.
#[must_use]
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Reads `key` from a JSON object as display text.
#[must_use]
pub fn text_field(obj: &Value, key: &str) -> Option<String> {
    obj.get(key).and_then(value_text)
}
