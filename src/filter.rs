//! Severity and free-text predicates applied before grouping.

use serde::{Deserialize, Serialize};

use crate::types::ViolationRecord;

/// How much of a record the search term is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SearchScope {
    /// Scalar fields and joined tags.
    #[default]
    Fields,
    /// Scalar fields plus the JSON text of locations and the raw violation.
    Deep,
}

/// Exclusive single-select severity filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SeverityFilter(Option<String>);

impl SeverityFilter {
    /// Filter that lets everything through.
    #[must_use]
    pub fn none() -> Self {
        Self(None)
    }

    /// Filter for one level. An empty level means no filter.
    #[must_use]
    pub fn only(level: impl Into<String>) -> Self {
        let level = level.into();
        if level.is_empty() {
            Self(None)
        } else {
            Self(Some(level))
        }
    }

    /// Selecting the active level clears it; any other level replaces it.
    #[must_use]
    pub fn toggled(&self, level: &str) -> Self {
        match &self.0 {
            Some(current) if current == level => Self(None),
            _ => Self::only(level),
        }
    }

    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.0.as_deref()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.0.is_some()
    }

    #[must_use]
    pub fn matches(&self, record: &ViolationRecord) -> bool {
        match &self.0 {
            None => true,
            Some(level) => record.severity_key().as_deref() == Some(level.as_str()),
        }
    }
}

/// A trimmed, lower-cased search term. Empty means inactive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SearchTerm(String);

impl SearchTerm {
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.0.is_empty()
    }

    /// True if any searchable field contains the term, ignoring case.
    #[must_use]
    pub fn matches(&self, record: &ViolationRecord, scope: SearchScope) -> bool {
        if !self.is_active() {
            return true;
        }
        record
            .searchable_fields(scope == SearchScope::Deep)
            .iter()
            .any(|field| field.to_lowercase().contains(&self.0))
    }
}

/// Both predicates, composed with logical AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub severity: SeverityFilter,
    pub search: SearchTerm,
    #[serde(skip)]
    pub scope: SearchScope,
}

impl FilterState {
    #[must_use]
    pub fn matches(&self, record: &ViolationRecord) -> bool {
        self.severity.matches(record) && self.search.matches(record, self.scope)
    }

    /// Records passing both predicates, in input order.
    #[must_use]
    pub fn apply<'a>(&self, records: &'a [ViolationRecord]) -> Vec<&'a ViolationRecord> {
        let visible: Vec<_> = records.iter().filter(|r| self.matches(r)).collect();
        tracing::trace!(
            total = records.len(),
            visible = visible.len(),
            severity = ?self.severity.selected(),
            search = self.search.as_str(),
            "applied filters"
        );
        visible
    }

    /// Records passing the search predicate only; grouping applies severity itself.
    #[must_use]
    pub fn searched<'a>(&self, records: &'a [ViolationRecord]) -> Vec<&'a ViolationRecord> {
        records
            .iter()
            .filter(|r| self.search.matches(r, self.scope))
            .collect()
    }
}
