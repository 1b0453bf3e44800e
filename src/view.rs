//! Display metadata derived from normalized and grouped data.

use serde::Serialize;
use serde_json::Value;
use std::cmp::Ordering;

use crate::grouping::GroupingMode;
use crate::types::{ViolationCounts, ViolationRecord};

/// Prefix marking a severity entry in `violationCounts`.
pub const SEVERITY_PREFIX: &str = "sev";

/// Shown when a tabular view has nothing left to display.
pub const EMPTY_MESSAGE: &str = "No Violations Found";

/// One severity level in the summary bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeverityLevel {
    pub level: String,
    pub count: u64,
    pub label: String,
    pub button_class: String,
    pub button_variant: &'static str,
}

/// Severity entries of `counts`, ordered by numeric level.
///
/// Levels that are not integers sort after the numeric ones, by text.
#[must_use]
pub fn severity_summary(counts: Option<&ViolationCounts>) -> Vec<SeverityLevel> {
    let Some(counts) = counts else {
        return Vec::new();
    };
    let mut levels: Vec<SeverityLevel> = counts
        .iter()
        .filter_map(|(key, count)| {
            let level = key.strip_prefix(SEVERITY_PREFIX)?;
            Some(SeverityLevel {
                level: level.to_string(),
                count,
                label: format!("Severity {level}: {count}"),
                button_class: format!("severity-{level}-btn"),
                button_variant: "brand",
            })
        })
        .collect();
    levels.sort_by(|a, b| compare_levels(&a.level, &b.level));
    levels
}

fn compare_levels(a: &str, b: &str) -> Ordering {
    match (a.parse::<i64>(), b.parse::<i64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Text,
    Number,
}

/// A column a display layer should render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub field_name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: ColumnKind,
}

impl Column {
    #[must_use]
    pub fn new(field_name: &str, label: &str, kind: ColumnKind) -> Self {
        Self {
            field_name: field_name.to_string(),
            label: label.to_string(),
            kind,
        }
    }

    /// Generic text column labelled with the capitalized field name.
    #[must_use]
    pub fn generic(field_name: &str) -> Self {
        Self::new(field_name, &capitalize(field_name), ColumnKind::Text)
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// One generic column per distinct object key across `rows`, in first-seen order.
#[must_use]
pub fn dump_columns(rows: &[Value]) -> Vec<Column> {
    let mut seen: Vec<&str> = Vec::new();
    for obj in rows.iter().filter_map(Value::as_object) {
        for key in obj.keys() {
            if !seen.contains(&key.as_str()) {
                seen.push(key);
            }
        }
    }
    seen.into_iter().map(Column::generic).collect()
}

/// Field names of a serialized [`ViolationRecord`], in serialization order.
const RECORD_FIELDS: &[&str] = &[
    "id",
    "rule",
    "engine",
    "severity",
    "file",
    "line",
    "message",
    "resource",
    "tags",
    "allLocations",
    "sinkFileName",
    "fullViolation",
];

/// Generic columns for ungrouped rows: every field any row serializes.
#[must_use]
pub fn record_columns(records: &[&ViolationRecord]) -> Vec<Column> {
    if records.is_empty() {
        return Vec::new();
    }
    let has_sink = records.iter().any(|r| r.sink_file_name.is_some());
    RECORD_FIELDS
        .iter()
        .filter(|f| has_sink || **f != "sinkFileName")
        .map(|f| Column::generic(f))
        .collect()
}

/// Columns for the violations inside a grouped view.
#[must_use]
pub fn grouped_columns(mode: GroupingMode) -> Vec<Column> {
    match mode {
        GroupingMode::TypeFilename => vec![
            Column::new("engine", "Engine", ColumnKind::Text),
            Column::new("rule", "Rule", ColumnKind::Text),
            Column::new("severity", "Severity", ColumnKind::Text),
            Column::new("line", "Line", ColumnKind::Number),
            Column::new("message", "Message", ColumnKind::Text),
        ],
        GroupingMode::Engine | GroupingMode::Filename | GroupingMode::None => vec![
            Column::new("file", "File", ColumnKind::Text),
            Column::new("line", "Line", ColumnKind::Number),
            Column::new("message", "Message", ColumnKind::Text),
        ],
    }
}
