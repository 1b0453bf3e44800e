//! Terminal presentation of a [`ViewModel`].

use colored::Colorize;
use std::fmt::Write;

use crate::error::Result;
use crate::grouping::{EngineGroup, FilenameGroup, MetaTypeGroup};
use crate::state::{DisplayOutput, ViewModel};
use crate::types::ViolationRecord;
use crate::view::Column;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Indented tree for people.
    #[default]
    Text,
    /// The full view model as JSON.
    Json,
    /// The full view model as YAML.
    Yaml,
}

/// Renders `view` in the requested format.
///
/// # Errors
/// Returns error if serialization or formatting fails.
pub fn render(view: &ViewModel<'_>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => format_text(view),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(view)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(view)?),
    }
}

/// Builds the human-readable report.
///
/// # Errors
/// Returns error if formatting fails.
pub fn format_text(view: &ViewModel<'_>) -> Result<String> {
    let mut out = String::new();
    write_severity_bar(&mut out, view)?;

    match &view.output {
        DisplayOutput::Raw { text } => writeln!(out, "{text}")?,
        DisplayOutput::FlatDump { payload, .. } => out.push_str(&serde_yaml::to_string(payload)?),
        DisplayOutput::Tabular { rows, .. } => write_rows(&mut out, rows)?,
        DisplayOutput::GroupedByEngine { columns, tree } => write_engines(&mut out, columns, tree)?,
        DisplayOutput::GroupedByMetadataType { columns, tree } => {
            write_meta_types(&mut out, columns, tree)?;
        }
        DisplayOutput::GroupedByFilename { columns, tree } => {
            write_filenames(&mut out, columns, tree)?;
        }
    }

    if let Some(message) = view.message {
        writeln!(out, "{}", message.dimmed())?;
    }
    Ok(out)
}

fn write_severity_bar(out: &mut String, view: &ViewModel<'_>) -> Result<()> {
    if view.severity_levels.is_empty() {
        return Ok(());
    }
    let parts: Vec<String> = view
        .severity_levels
        .iter()
        .map(|level| {
            if view.selected_severity == Some(level.level.as_str()) {
                format!("[{}]", level.label).yellow().bold().to_string()
            } else {
                level.label.clone()
            }
        })
        .collect();
    writeln!(out, "{}", parts.join(" | "))?;
    writeln!(out)?;
    Ok(())
}

fn write_engines(out: &mut String, columns: &[Column], tree: &[EngineGroup<'_>]) -> Result<()> {
    for engine in tree {
        write!(out, "{}", engine.label.bold())?;
        if !engine.description.is_empty() {
            write!(out, "  {}", engine.description.dimmed())?;
        }
        writeln!(out)?;
        for rule in &engine.rules {
            write!(out, "  {}", rule.label.cyan())?;
            if let Some(sev) = &rule.severity {
                write!(out, "  severity {sev}")?;
            }
            if !rule.tags_string.is_empty() {
                write!(out, "  [{}]", rule.tags_string)?;
            }
            writeln!(out)?;
            if !rule.resource.is_empty() {
                writeln!(out, "    {}", rule.resource.underline())?;
            }
            for v in &rule.violations {
                writeln!(out, "    {}", cells(columns, v))?;
            }
        }
    }
    Ok(())
}

fn write_meta_types(
    out: &mut String,
    columns: &[Column],
    tree: &[MetaTypeGroup<'_>],
) -> Result<()> {
    for meta in tree {
        writeln!(out, "{}", meta.label.bold())?;
        for file in &meta.files {
            writeln!(out, "  {}", file.label.cyan())?;
            for v in &file.violations {
                writeln!(out, "    {}", cells(columns, v))?;
            }
        }
    }
    Ok(())
}

fn write_filenames(
    out: &mut String,
    columns: &[Column],
    tree: &[FilenameGroup<'_>],
) -> Result<()> {
    for file in tree {
        writeln!(out, "{}", file.label.bold())?;
        for v in &file.violations {
            writeln!(out, "  {}", cells(columns, v))?;
        }
    }
    Ok(())
}

/// Ungrouped rows are summarized on one line each; the JSON output carries every column.
fn write_rows(out: &mut String, rows: &[&ViolationRecord]) -> Result<()> {
    for v in rows {
        writeln!(
            out,
            "{}  {}:{}  {}",
            cell(v, "engine").dimmed(),
            cell(v, "file"),
            cell(v, "line"),
            cell(v, "message")
        )?;
    }
    Ok(())
}

fn cells(columns: &[Column], v: &ViolationRecord) -> String {
    columns
        .iter()
        .map(|c| cell(v, &c.field_name))
        .collect::<Vec<_>>()
        .join("  ")
}

fn cell(v: &ViolationRecord, field: &str) -> String {
    match field {
        "id" => v.id.clone(),
        "rule" => v.rule.clone().unwrap_or_default(),
        "engine" => v.engine.clone().unwrap_or_default(),
        "severity" => v.severity_key().unwrap_or_default(),
        "file" => v.file.clone().unwrap_or_default(),
        "line" => v.line.map(|l| l.to_string()).unwrap_or_default(),
        "message" => v.message.clone().unwrap_or_default(),
        "resource" => v.resource.clone(),
        "tags" => v.tags_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewConfig;
    use crate::grouping::GroupingMode;
    use crate::normalize::normalize;
    use crate::state::ViewState;

    const REPORT: &str = r#"{"violations": [
        {"engine": "pmd", "rule": "ApexDoc", "severity": 3, "message": "Missing doc",
         "tags": ["Documentation"],
         "locations": [{"file": "main/default/classes/Foo.cls", "startLine": 5}]}
    ]}"#;

    fn plain(s: &str) -> String {
        // Strip ANSI escapes so assertions don't depend on terminal detection.
        let re = regex::Regex::new(r"\x1b\[[0-9;]*m").unwrap_or_else(|_| panic!("regex"));
        re.replace_all(s, "").into_owned()
    }

    #[test]
    fn engine_text_lists_rule_and_location() {
        let state = ViewState::new(normalize(REPORT), ViewConfig::default());
        let text = plain(&format_text(&state.render()).unwrap_or_default());
        assert!(text.contains("pmd (1)"));
        assert!(text.contains("ApexDoc (1)"));
        assert!(text.contains("[Documentation]"));
        assert!(text.contains("main/default/classes/Foo.cls  5  Missing doc"));
    }

    #[test]
    fn type_filename_text_shows_engine_columns() {
        let state = ViewState::new(normalize(REPORT), ViewConfig::default())
            .group_by(GroupingMode::TypeFilename);
        let text = plain(&format_text(&state.render()).unwrap_or_default());
        assert!(text.contains("classes (1)"));
        assert!(text.contains("pmd  ApexDoc  3  5  Missing doc"));
    }

    #[test]
    fn flat_dump_renders_yaml() {
        let state = ViewState::new(normalize(r#"{"status": "ok"}"#), ViewConfig::default());
        let text = format_text(&state.render()).unwrap_or_default();
        assert!(text.contains("status: ok"));
    }

    #[test]
    fn json_output_is_parseable() {
        let state = ViewState::new(normalize(REPORT), ViewConfig::default());
        let json = render(&state.render(), OutputFormat::Json).unwrap_or_default();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap_or_default();
        assert_eq!(v["mode"], "GroupedByEngine");
        assert_eq!(v["tree"][0]["rules"][0]["tagsString"], "Documentation");
    }
}
