use serde::Serialize;

use super::engines::engine_description;
use super::FirstSeen;
use crate::filter::SeverityFilter;
use crate::types::{Severity, ViolationRecord, UNDEFINED};

/// Top level of the engine/rule view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineGroup<'a> {
    pub key: String,
    pub label: String,
    pub description: &'static str,
    pub violation_count: usize,
    pub rules: Vec<RuleGroup<'a>>,
}

/// One rule under an engine.
///
/// `severity`, `tags_string` and `resource` come from the first record seen
/// for the rule; later records do not change them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleGroup<'a> {
    pub key: String,
    pub label: String,
    pub severity: Option<Severity>,
    pub tags_string: String,
    pub resource: String,
    pub violations: Vec<&'a ViolationRecord>,
}

/// Single-level rule bucket, unfiltered.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleBucket<'a> {
    pub key: String,
    pub engine: Option<String>,
    pub severity: Option<Severity>,
    pub tags: Option<Vec<String>>,
    pub resource: String,
    pub violations: Vec<&'a ViolationRecord>,
}

struct EngineBucket<'a> {
    rules: FirstSeen<RuleBucket<'a>>,
    violation_count: usize,
}

fn rule_bucket<'a>(record: &ViolationRecord) -> RuleBucket<'a> {
    RuleBucket {
        key: key_of(record.rule.as_deref()),
        engine: record.engine.clone(),
        severity: record.severity.clone(),
        tags: record.tags.clone(),
        resource: record.resource.clone(),
        violations: Vec::new(),
    }
}

fn key_of(value: Option<&str>) -> String {
    value.unwrap_or(UNDEFINED).to_string()
}

/// Groups records by engine, then by rule, skipping those that fail `severity`.
pub fn group_by_engine_rule<'a, I>(records: I, severity: &SeverityFilter) -> Vec<EngineGroup<'a>>
where
    I: IntoIterator<Item = &'a ViolationRecord>,
{
    let mut engines: FirstSeen<EngineBucket<'a>> = FirstSeen::new();

    for record in records.into_iter().filter(|r| severity.matches(r)) {
        let engine_key = key_of(record.engine.as_deref());
        let rule_key = key_of(record.rule.as_deref());

        let engine = engines.bucket(&engine_key, || EngineBucket {
            rules: FirstSeen::new(),
            violation_count: 0,
        });
        engine
            .rules
            .bucket(&rule_key, || rule_bucket(record))
            .violations
            .push(record);
        engine.violation_count += 1;
    }

    let groups: Vec<EngineGroup<'a>> = engines
        .into_entries()
        .into_iter()
        .map(|(key, bucket)| EngineGroup {
            label: format!("{key} ({})", bucket.violation_count),
            description: engine_description(&key),
            violation_count: bucket.violation_count,
            rules: bucket
                .rules
                .into_entries()
                .into_iter()
                .map(|(_, rule)| finish_rule(rule))
                .collect(),
            key,
        })
        .collect();

    tracing::debug!(engines = groups.len(), "grouped by engine/rule");
    groups
}

fn finish_rule(rule: RuleBucket<'_>) -> RuleGroup<'_> {
    RuleGroup {
        label: format!("{} ({})", rule.key, rule.violations.len()),
        tags_string: rule.tags.as_ref().map(|t| t.join(", ")).unwrap_or_default(),
        key: rule.key,
        severity: rule.severity,
        resource: rule.resource,
        violations: rule.violations,
    }
}

/// Flat grouping by rule alone, in first-seen order.
pub fn group_by_rule<'a, I>(records: I) -> Vec<RuleBucket<'a>>
where
    I: IntoIterator<Item = &'a ViolationRecord>,
{
    let mut rules: FirstSeen<RuleBucket<'a>> = FirstSeen::new();
    for record in records {
        rules
            .bucket(&key_of(record.rule.as_deref()), || rule_bucket(record))
            .violations
            .push(record);
    }
    rules.into_entries().into_iter().map(|(_, b)| b).collect()
}
