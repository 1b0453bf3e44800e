use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// The `violationCounts` block of a report: `sev1`, `sev2`, ... mapped to counts.
///
/// Entries whose value is not a non-negative integer are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ViolationCounts(BTreeMap<String, u64>);

impl ViolationCounts {
    /// Reads the block from a parsed report. Returns `None` if it is absent
    /// or not an object.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let mut counts = BTreeMap::new();
        for (key, raw) in obj {
            match raw.as_u64() {
                Some(n) => {
                    counts.insert(key.clone(), n);
                }
                None => tracing::debug!(key = %key, "skipping non-integer violation count"),
            }
        }
        Some(Self(counts))
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<u64> {
        self.0.get(key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl FromIterator<(String, u64)> for ViolationCounts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_integer_counts() {
        let c = ViolationCounts::from_value(&json!({"sev1": 2, "total": 3}));
        let c = c.unwrap_or_default();
        assert_eq!(c.get("sev1"), Some(2));
        assert_eq!(c.get("total"), Some(3));
    }

    #[test]
    fn skips_non_integer_entries() {
        let c = ViolationCounts::from_value(&json!({"sev1": "two", "sev2": 1}))
            .unwrap_or_default();
        assert_eq!(c.get("sev1"), None);
        assert_eq!(c.get("sev2"), Some(1));
    }

    #[test]
    fn non_object_is_absent() {
        assert!(ViolationCounts::from_value(&json!([1, 2])).is_none());
    }
}
