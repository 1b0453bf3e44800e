use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use super::FirstSeen;
use crate::filter::SeverityFilter;
use crate::types::ViolationRecord;

/// File key for records that carry no file at all.
pub const UNKNOWN_FILE: &str = "Unknown File";
/// Metadata type for paths outside a `main/default/<type>/` tree.
pub const UNKNOWN_TYPE: &str = "Unknown";

const MAIN_DEFAULT_PATTERN: &str = r"main/default/([^/]+)/(.+)";

static MAIN_DEFAULT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(MAIN_DEFAULT_PATTERN).unwrap_or_else(|_| panic!("Invalid Regex"))
});

/// Top level of the metadata-type/file view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaTypeGroup<'a> {
    pub key: String,
    pub label: String,
    pub violation_count: usize,
    pub files: Vec<FileGroup<'a>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileGroup<'a> {
    pub key: String,
    pub label: String,
    pub violations: Vec<&'a ViolationRecord>,
}

/// Splits a path into `(metadata type, file)` using the segment after
/// `main/default/`. Paths without that segment keep the whole path as the
/// file under [`UNKNOWN_TYPE`]; an absent or empty path is [`UNKNOWN_FILE`].
#[must_use]
pub fn metadata_path(file: Option<&str>) -> (String, String) {
    let Some(file) = file.filter(|f| !f.is_empty()) else {
        return (UNKNOWN_TYPE.to_string(), UNKNOWN_FILE.to_string());
    };
    match MAIN_DEFAULT_RE.captures(file) {
        Some(caps) => (caps[1].to_string(), caps[2].to_string()),
        None => (UNKNOWN_TYPE.to_string(), file.to_string()),
    }
}

/// Groups records by metadata type, then by file, skipping those that fail `severity`.
pub fn group_by_metadata_type_file<'a, I>(
    records: I,
    severity: &SeverityFilter,
) -> Vec<MetaTypeGroup<'a>>
where
    I: IntoIterator<Item = &'a ViolationRecord>,
{
    let mut types: FirstSeen<FirstSeen<Vec<&'a ViolationRecord>>> = FirstSeen::new();

    for record in records.into_iter().filter(|r| severity.matches(r)) {
        let (meta_type, file) = metadata_path(record.file.as_deref());
        types
            .bucket(&meta_type, FirstSeen::new)
            .bucket(&file, Vec::new)
            .push(record);
    }

    let groups: Vec<MetaTypeGroup<'a>> = types
        .into_entries()
        .into_iter()
        .map(|(key, files)| {
            let files: Vec<FileGroup<'a>> = files
                .into_entries()
                .into_iter()
                .map(|(file, violations)| FileGroup {
                    label: format!("{file} ({})", violations.len()),
                    key: file,
                    violations,
                })
                .collect();
            let total: usize = files.iter().map(|f| f.violations.len()).sum();
            MetaTypeGroup {
                label: format!("{key} ({total})"),
                key,
                violation_count: total,
                files,
            }
        })
        .collect();

    tracing::debug!(types = groups.len(), "grouped by metadata type/file");
    groups
}
