use serde::Serialize;

use super::metadata::UNKNOWN_FILE;
use super::FirstSeen;
use crate::filter::SeverityFilter;
use crate::types::ViolationRecord;

/// One file in the flat filename view. The label carries no count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilenameGroup<'a> {
    pub key: String,
    pub label: String,
    pub violations: Vec<&'a ViolationRecord>,
}

fn file_key(record: &ViolationRecord) -> &str {
    [record.sink_file_name.as_deref(), record.file.as_deref()]
        .into_iter()
        .flatten()
        .find(|f| !f.is_empty())
        .unwrap_or(UNKNOWN_FILE)
}

/// Groups records by `sinkFileName`, falling back to the primary file.
pub fn group_by_filename<'a, I>(records: I, severity: &SeverityFilter) -> Vec<FilenameGroup<'a>>
where
    I: IntoIterator<Item = &'a ViolationRecord>,
{
    let mut files: FirstSeen<Vec<&'a ViolationRecord>> = FirstSeen::new();
    for record in records.into_iter().filter(|r| severity.matches(r)) {
        files.bucket(file_key(record), Vec::new).push(record);
    }
    files
        .into_entries()
        .into_iter()
        .map(|(key, violations)| FilenameGroup {
            label: key.clone(),
            key,
            violations,
        })
        .collect()
}
