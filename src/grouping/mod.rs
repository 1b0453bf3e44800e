//! Tree-shaped views over a list of normalized records.
//!
//! Every builder is a single pass that keeps buckets in first-seen order, so
//! output is deterministic for a given input order. Records with missing
//! keys land in a placeholder bucket; nothing is dropped.

mod engine;
mod engines;
mod filename;
mod metadata;

pub use engine::{group_by_engine_rule, group_by_rule, EngineGroup, RuleBucket, RuleGroup};
pub use engines::{engine_description, ENGINE_DESCRIPTIONS};
pub use filename::{group_by_filename, FilenameGroup};
pub use metadata::{
    group_by_metadata_type_file, metadata_path, FileGroup, MetaTypeGroup, UNKNOWN_FILE,
    UNKNOWN_TYPE,
};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Which hierarchical view is shown.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum GroupingMode {
    /// Engine, then rule.
    #[default]
    Engine,
    /// Metadata type, then file.
    #[value(name = "typefilename")]
    TypeFilename,
    /// One level, by file name.
    Filename,
    /// No grouping; plain rows.
    None,
}

impl GroupingMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Engine => "engine",
            Self::TypeFilename => "typefilename",
            Self::Filename => "filename",
            Self::None => "none",
        }
    }

    /// Human label for a mode picker.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Engine => "Engine/Rule",
            Self::TypeFilename => "Type/Filename",
            Self::Filename => "Filename",
            Self::None => "Ungrouped",
        }
    }
}

impl fmt::Display for GroupingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "engine" => Ok(Self::Engine),
            "typefilename" => Ok(Self::TypeFilename),
            "filename" => Ok(Self::Filename),
            "none" => Ok(Self::None),
            other => Err(format!("unknown grouping mode: {other}")),
        }
    }
}

/// Ordered-by-first-seen map from a string key to a bucket.
pub(crate) struct FirstSeen<V> {
    index: HashMap<String, usize>,
    entries: Vec<(String, V)>,
}

impl<V> FirstSeen<V> {
    pub(crate) fn new() -> Self {
        Self { index: HashMap::new(), entries: Vec::new() }
    }

    /// Returns the bucket for `key`, creating it with `make` on first sight.
    pub(crate) fn bucket(&mut self, key: &str, make: impl FnOnce() -> V) -> &mut V {
        let slot = match self.index.get(key) {
            Some(&i) => i,
            None => {
                let i = self.entries.len();
                self.index.insert(key.to_string(), i);
                self.entries.push((key.to_string(), make()));
                i
            }
        };
        &mut self.entries[slot].1
    }

    pub(crate) fn into_entries(self) -> Vec<(String, V)> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_seen_keeps_insertion_order() {
        let mut m: FirstSeen<Vec<u8>> = FirstSeen::new();
        m.bucket("b", Vec::new).push(1);
        m.bucket("a", Vec::new).push(2);
        m.bucket("b", Vec::new).push(3);
        let keys: Vec<_> = m.into_entries().into_iter().map(|(k, v)| (k, v.len())).collect();
        assert_eq!(keys, vec![("b".to_string(), 2), ("a".to_string(), 1)]);
    }

    #[test]
    fn grouping_mode_round_trips_through_text() {
        for mode in [
            GroupingMode::Engine,
            GroupingMode::TypeFilename,
            GroupingMode::Filename,
            GroupingMode::None,
        ] {
            assert_eq!(mode.as_str().parse::<GroupingMode>(), Ok(mode));
        }
        assert!("rule".parse::<GroupingMode>().is_err());
    }
}
