use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;

/// Severity as reported by an engine. Engines disagree on whether this is a
/// number or a string, so both shapes are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Severity {
    Number(Number),
    Text(String),
}

impl Severity {
    /// Lifts a raw JSON value. `null` means no severity.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Number(n) => Some(Self::Number(n.clone())),
            Value::String(s) => Some(Self::Text(s.clone())),
            other => Some(Self::Text(other.to_string())),
        }
    }

    /// String form used for filter comparison, so `3`, `3.0` and `"3"` are equal.
    #[must_use]
    pub fn as_key(&self) -> String {
        match self {
            Self::Number(n) => number_key(n),
            Self::Text(s) => s.clone(),
        }
    }
}

/// Integral floats print without a fractional part; other numbers print as parsed.
fn number_key(n: &Number) -> String {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    match n.as_f64() {
        #[allow(clippy::cast_possible_truncation)]
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() <= MAX_EXACT => {
            (f as i64).to_string()
        }
        _ => n.to_string(),
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_key())
    }
}
