use serde::Serialize;
use serde_json::{Map, Value};

use super::{text_field, value_text, Severity, UNDEFINED};

/// A source position attached to a violation.
///
/// Only `file` and `startLine` are interpreted; other keys, and a
/// `startLine` that is not an integer, ride along in `extra` so the
/// location can be shown as reported.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_line: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Location {
    /// Lenient conversion: anything that is not an object yields an empty location.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };
        let file = text_field(value, "file");
        let start_line = value.get("startLine").and_then(Value::as_i64);
        // Values that did not parse stay in `extra` as reported.
        let extra = obj
            .iter()
            .filter(|(k, _)| match k.as_str() {
                "file" => file.is_none(),
                "startLine" => start_line.is_none(),
                _ => true,
            })
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Self {
            file,
            start_line,
            extra,
        }
    }
}

/// Canonical flat view of one reported violation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationRecord {
    pub id: String,
    pub rule: Option<String>,
    pub engine: Option<String>,
    pub severity: Option<Severity>,
    pub file: Option<String>,
    pub line: Option<i64>,
    pub message: Option<String>,
    /// First entry of `resources`; the rest are not retained.
    pub resource: String,
    pub tags: Option<Vec<String>>,
    pub all_locations: Option<Vec<Location>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sink_file_name: Option<String>,
    pub full_violation: Value,
}

impl ViolationRecord {
    /// Builds a record from the `index`-th entry of a report's `violations` array.
    #[must_use]
    pub fn from_raw(raw: &Value, index: usize) -> Self {
        let locations: Option<Vec<Location>> = raw
            .get("locations")
            .and_then(Value::as_array)
            .map(|locs| locs.iter().map(Location::from_value).collect());
        let primary = primary_location(raw, locations.as_deref());

        let rule = text_field(raw, "rule");
        let id = format!(
            "{}-{}-{}-{index}",
            rule.as_deref().unwrap_or(UNDEFINED),
            primary.file.as_deref().unwrap_or(UNDEFINED),
            primary
                .start_line
                .map_or_else(|| UNDEFINED.to_string(), |l| l.to_string()),
        );

        Self {
            id,
            rule,
            engine: text_field(raw, "engine"),
            severity: raw.get("severity").and_then(Severity::from_value),
            file: primary.file,
            line: primary.start_line,
            message: text_field(raw, "message"),
            resource: first_resource(raw),
            tags: raw
                .get("tags")
                .and_then(Value::as_array)
                .map(|tags| tags.iter().map(|t| value_text(t).unwrap_or_default()).collect()),
            all_locations: locations,
            sink_file_name: text_field(raw, "sinkFileName"),
            full_violation: raw.clone(),
        }
    }

    /// Tags joined for display; empty when the report carried none.
    #[must_use]
    pub fn tags_string(&self) -> String {
        self.tags.as_ref().map(|t| t.join(", ")).unwrap_or_default()
    }

    /// Severity compared as text, or `None` if the engine gave none.
    #[must_use]
    pub fn severity_key(&self) -> Option<String> {
        self.severity.as_ref().map(Severity::as_key)
    }

    /// Text of every searchable field, in declaration order.
    ///
    /// Absent fields contribute nothing. With `deep` set, the nested
    /// locations and the original violation are included as compact JSON.
    #[must_use]
    pub fn searchable_fields(&self, deep: bool) -> Vec<String> {
        let mut fields = vec![self.id.clone()];
        fields.extend(self.rule.clone());
        fields.extend(self.engine.clone());
        fields.extend(self.severity_key());
        fields.extend(self.file.clone());
        fields.extend(self.line.map(|l| l.to_string()));
        fields.extend(self.message.clone());
        fields.push(self.resource.clone());
        fields.extend(self.tags.as_ref().map(|t| t.join(",")));
        if deep {
            if let Some(locs) = &self.all_locations {
                fields.extend(serde_json::to_string(locs).ok());
            }
            fields.push(self.full_violation.to_string());
        }
        fields
    }
}

/// `locations[primaryLocationIndex]` when that index names an object, else
/// the first location, else an empty location.
fn primary_location(raw: &Value, locations: Option<&[Location]>) -> Location {
    let Some(locations) = locations else {
        return Location::default();
    };
    let by_index = raw
        .get("primaryLocationIndex")
        .and_then(Value::as_u64)
        .and_then(|i| usize::try_from(i).ok())
        .filter(|&i| {
            raw.get("locations")
                .and_then(|l| l.get(i))
                .is_some_and(Value::is_object)
        })
        .and_then(|i| locations.get(i));
    by_index
        .or_else(|| locations.first())
        .cloned()
        .unwrap_or_default()
}

fn first_resource(raw: &Value) -> String {
    raw.get("resources")
        .and_then(Value::as_array)
        .and_then(|r| r.first())
        .and_then(value_text)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn primary_index_selects_location() {
        let raw = json!({
            "rule": "R1",
            "locations": [
                {"file": "a.cls", "startLine": 1},
                {"file": "b.cls", "startLine": 9}
            ],
            "primaryLocationIndex": 1
        });
        let r = ViolationRecord::from_raw(&raw, 0);
        assert_eq!(r.file.as_deref(), Some("b.cls"));
        assert_eq!(r.line, Some(9));
        assert_eq!(r.id, "R1-b.cls-9-0");
    }

    #[test]
    fn out_of_range_index_falls_back_to_first() {
        let raw = json!({
            "locations": [{"file": "a.cls", "startLine": 3}],
            "primaryLocationIndex": 7
        });
        let r = ViolationRecord::from_raw(&raw, 2);
        assert_eq!(r.file.as_deref(), Some("a.cls"));
        assert_eq!(r.id, "undefined-a.cls-3-2");
    }

    #[test]
    fn missing_locations_give_empty_primary() {
        let r = ViolationRecord::from_raw(&json!({"rule": "R"}), 0);
        assert!(r.file.is_none());
        assert!(r.line.is_none());
        assert!(r.all_locations.is_none());
        assert_eq!(r.id, "R-undefined-undefined-0");
    }

    #[test]
    fn keeps_only_first_resource() {
        let raw = json!({"resources": ["https://a", "https://b"]});
        let r = ViolationRecord::from_raw(&raw, 0);
        assert_eq!(r.resource, "https://a");
    }

    #[test]
    fn non_array_tags_are_absent() {
        let r = ViolationRecord::from_raw(&json!({"tags": "Security"}), 0);
        assert!(r.tags.is_none());
        assert_eq!(r.tags_string(), "");
    }

    #[test]
    fn extra_location_keys_are_kept() {
        let loc = Location::from_value(&json!({"file": "x", "startLine": 1, "endLine": 4}));
        assert_eq!(loc.extra.get("endLine"), Some(&json!(4)));
    }

    #[test]
    fn unparsed_start_line_stays_in_location() {
        let raw = json!({"rule": "R", "locations": [{"file": "a.cls", "startLine": "12"}]});
        let r = ViolationRecord::from_raw(&raw, 0);
        assert!(r.line.is_none());
        assert_eq!(r.id, "R-a.cls-undefined-0");
        let all = serde_json::to_value(&r.all_locations).unwrap_or_default();
        assert_eq!(all, json!([{"file": "a.cls", "startLine": "12"}]));
    }

    #[test]
    fn shallow_search_skips_nested_values() {
        let raw = json!({"rule": "R", "locations": [{"file": "f", "startLine": 1}]});
        let r = ViolationRecord::from_raw(&raw, 0);
        let fields = r.searchable_fields(false);
        assert!(fields.iter().all(|f| !f.contains("startLine")));
        assert!(r.searchable_fields(true).iter().any(|f| f.contains("startLine")));
    }
}
