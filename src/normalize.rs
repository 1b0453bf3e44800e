//! Turns decoded report text into canonical violation records.
//!
//! Parse failure is an expected outcome here, not an error: text that is not
//! JSON is handed back untouched as [`Payload::Raw`].

use serde::Serialize;
use serde_json::Value;

use crate::types::{ViolationCounts, ViolationRecord};

/// How a decoded report should be displayed, with the data for that mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", content = "payload")]
pub enum Payload {
    /// At least one violation was found; one record per violation, in source order.
    Tabular(Vec<ViolationRecord>),
    /// Valid JSON that is not a non-empty violation list.
    FlatDump(Value),
    /// Text that did not parse as JSON.
    Raw(String),
}

impl Payload {
    #[must_use]
    pub fn mode_name(&self) -> &'static str {
        match self {
            Self::Tabular(_) => "Tabular",
            Self::FlatDump(_) => "FlatDump",
            Self::Raw(_) => "Raw",
        }
    }

    /// Normalized records, empty for the non-tabular modes.
    #[must_use]
    pub fn records(&self) -> &[ViolationRecord] {
        match self {
            Self::Tabular(records) => records,
            Self::FlatDump(_) | Self::Raw(_) => &[],
        }
    }
}

/// Result of normalizing one report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Normalized {
    pub payload: Payload,
    pub violation_counts: Option<ViolationCounts>,
}

impl Normalized {
    #[must_use]
    pub fn records(&self) -> &[ViolationRecord] {
        self.payload.records()
    }
}

/// Parses `raw_text` and decides the display mode.
#[must_use]
pub fn normalize(raw_text: &str) -> Normalized {
    let parsed: Value = match serde_json::from_str(raw_text) {
        Ok(v) => v,
        Err(e) => {
            tracing::debug!(error = %e, "report is not JSON; falling back to raw text");
            return Normalized {
                payload: Payload::Raw(raw_text.to_string()),
                violation_counts: None,
            };
        }
    };

    let violation_counts = parsed
        .get("violationCounts")
        .and_then(ViolationCounts::from_value);

    let payload = match transform(&parsed) {
        Some(records) if !records.is_empty() => Payload::Tabular(records),
        _ => Payload::FlatDump(parsed),
    };

    tracing::debug!(
        mode = payload.mode_name(),
        records = payload.records().len(),
        "normalized report"
    );

    Normalized { payload, violation_counts }
}

/// Maps every entry of `violations` to a record. `None` when the report has
/// no `violations` array at all.
fn transform(parsed: &Value) -> Option<Vec<ViolationRecord>> {
    let violations = parsed.get("violations")?.as_array()?;
    Some(
        violations
            .iter()
            .enumerate()
            .map(|(idx, raw)| ViolationRecord::from_raw(raw, idx))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn not_json_is_raw() {
        let n = normalize("not json");
        assert_eq!(n.payload, Payload::Raw("not json".to_string()));
        assert!(n.violation_counts.is_none());
    }

    #[test]
    fn empty_violations_is_flat_dump_of_parsed_json() {
        let text = r#"{"violations": [], "violationCounts": {"sev1": 0}}"#;
        let n = normalize(text);
        let expected: Value = serde_json::from_str(text).unwrap_or_default();
        assert_eq!(n.payload, Payload::FlatDump(expected));
        assert_eq!(n.violation_counts.and_then(|c| c.get("sev1")), Some(0));
    }

    #[test]
    fn non_array_violations_is_flat_dump() {
        let n = normalize(r#"{"violations": "none"}"#);
        assert_eq!(n.payload, Payload::FlatDump(json!({"violations": "none"})));
    }

    #[test]
    fn records_keep_source_order() {
        let n = normalize(
            r#"{"violations": [{"rule": "B"}, {"rule": "A"}, {"rule": "B"}]}"#,
        );
        let rules: Vec<_> = n.records().iter().map(|r| r.rule.clone()).collect();
        assert_eq!(
            rules,
            vec![Some("B".into()), Some("A".into()), Some("B".into())]
        );
    }

    #[test]
    fn ids_are_unique_when_fields_collide() {
        let n = normalize(r#"{"violations": [{"rule": "R"}, {"rule": "R"}]}"#);
        let ids: Vec<_> = n.records().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["R-undefined-undefined-0", "R-undefined-undefined-1"]);
    }

    #[test]
    fn non_object_entries_still_become_records() {
        let n = normalize(r#"{"violations": [null, 3]}"#);
        assert_eq!(n.records().len(), 2);
        assert!(n.records().iter().all(|r| r.engine.is_none()));
    }

    #[test]
    fn scalar_json_is_flat_dump() {
        assert_eq!(normalize("5").payload, Payload::FlatDump(json!(5)));
    }
}
