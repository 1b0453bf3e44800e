//! Caller-held view state and the display-ready output derived from it.
//!
//! A [`ViewState`] never changes in place: every interaction returns a new
//! state, and [`ViewState::render`] recomputes the whole view from scratch.

use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::config::ViewConfig;
use crate::filter::{FilterState, SearchTerm, SeverityFilter};
use crate::grouping::{
    group_by_engine_rule, group_by_filename, group_by_metadata_type_file, EngineGroup,
    FilenameGroup, GroupingMode, MetaTypeGroup,
};
use crate::normalize::{Normalized, Payload};
use crate::types::ViolationRecord;
use crate::view::{
    dump_columns, grouped_columns, record_columns, severity_summary, Column, SeverityLevel,
    EMPTY_MESSAGE,
};

/// What the presentation layer is asked to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode")]
pub enum DisplayOutput<'a> {
    Tabular {
        columns: Vec<Column>,
        rows: Vec<&'a ViolationRecord>,
    },
    GroupedByEngine {
        columns: Vec<Column>,
        tree: Vec<EngineGroup<'a>>,
    },
    GroupedByMetadataType {
        columns: Vec<Column>,
        tree: Vec<MetaTypeGroup<'a>>,
    },
    GroupedByFilename {
        columns: Vec<Column>,
        tree: Vec<FilenameGroup<'a>>,
    },
    /// Structured data for a YAML-style dump. `columns` is non-empty when
    /// the payload is an array of objects that could also be shown as a table.
    FlatDump {
        columns: Vec<Column>,
        payload: &'a Value,
    },
    /// Text that was not JSON.
    Raw { text: &'a str },
}

/// A rendered view plus the summary data shown around it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel<'a> {
    #[serde(flatten)]
    pub output: DisplayOutput<'a>,
    pub severity_levels: Vec<SeverityLevel>,
    pub selected_severity: Option<&'a str>,
    pub record_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

/// Current report, filters and grouping, as one immutable value.
#[derive(Debug, Clone)]
pub struct ViewState {
    report: Arc<Normalized>,
    filters: FilterState,
    grouping: GroupingMode,
    config: ViewConfig,
}

impl ViewState {
    #[must_use]
    pub fn new(report: Normalized, config: ViewConfig) -> Self {
        let filters = FilterState {
            scope: config.view.search_scope,
            ..FilterState::default()
        };
        Self {
            report: Arc::new(report),
            filters,
            grouping: config.initial_grouping(),
            config,
        }
    }

    #[must_use]
    pub fn report(&self) -> &Normalized {
        &self.report
    }

    #[must_use]
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    #[must_use]
    pub fn grouping(&self) -> GroupingMode {
        self.grouping
    }

    /// Selects `level`, or clears the filter if `level` is already selected.
    #[must_use]
    pub fn toggle_severity(&self, level: &str) -> Self {
        if !self.config.features.severity_filter {
            tracing::debug!("severity filter disabled; ignoring toggle");
            return self.clone();
        }
        let mut next = self.clone();
        next.filters.severity = self.filters.severity.toggled(level);
        next
    }

    /// Replaces the search term. Blank input clears the search.
    #[must_use]
    pub fn search(&self, raw: &str) -> Self {
        if !self.config.features.search {
            tracing::debug!("search disabled; ignoring term");
            return self.clone();
        }
        let mut next = self.clone();
        next.filters.search = SearchTerm::new(raw);
        next
    }

    #[must_use]
    pub fn group_by(&self, mode: GroupingMode) -> Self {
        let mut next = self.clone();
        next.grouping = if self.config.features.grouping {
            mode
        } else {
            GroupingMode::None
        };
        next
    }

    /// Records passing every active filter.
    #[must_use]
    pub fn visible_records(&self) -> Vec<&ViolationRecord> {
        self.filters.apply(self.report.records())
    }

    #[must_use]
    pub fn record_count(&self) -> usize {
        self.visible_records().len()
    }

    #[must_use]
    pub fn severity_levels(&self) -> Vec<SeverityLevel> {
        severity_summary(self.report.violation_counts.as_ref())
    }

    /// Recomputes the display output for the current state.
    #[must_use]
    pub fn render(&self) -> ViewModel<'_> {
        let output = self.output();
        let record_count = match &self.report.payload {
            Payload::Tabular(_) => self.record_count(),
            Payload::FlatDump(_) | Payload::Raw(_) => 0,
        };
        let message = match &output {
            DisplayOutput::Tabular { rows, .. } if rows.is_empty() => Some(EMPTY_MESSAGE),
            _ => None,
        };
        ViewModel {
            output,
            severity_levels: self.severity_levels(),
            selected_severity: self.filters.severity.selected(),
            record_count,
            message,
        }
    }

    fn output(&self) -> DisplayOutput<'_> {
        let records = match &self.report.payload {
            Payload::Tabular(records) => records,
            Payload::FlatDump(payload) => {
                let columns = payload
                    .as_array()
                    .map(|rows| dump_columns(rows))
                    .unwrap_or_default();
                return DisplayOutput::FlatDump { columns, payload };
            }
            Payload::Raw(text) => return DisplayOutput::Raw { text },
        };

        let searched = self.filters.searched(records);
        let severity: &SeverityFilter = &self.filters.severity;
        let columns = grouped_columns(self.grouping);

        match self.grouping {
            GroupingMode::Engine => DisplayOutput::GroupedByEngine {
                columns,
                tree: group_by_engine_rule(searched, severity),
            },
            GroupingMode::TypeFilename => DisplayOutput::GroupedByMetadataType {
                columns,
                tree: group_by_metadata_type_file(searched, severity),
            },
            GroupingMode::Filename => DisplayOutput::GroupedByFilename {
                columns,
                tree: group_by_filename(searched, severity),
            },
            GroupingMode::None => {
                let rows: Vec<_> = searched.into_iter().filter(|r| severity.matches(r)).collect();
                DisplayOutput::Tabular {
                    columns: record_columns(&rows),
                    rows,
                }
            }
        }
    }
}
