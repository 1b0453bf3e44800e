use anyhow::{Context, Result};
use colored::Colorize;

use super::args::InputArgs;
use crate::acquire;
use crate::config::ViewConfig;
use crate::exit::ScanlensExit;
use crate::filter::SearchScope;
use crate::grouping::{GroupingMode, ENGINE_DESCRIPTIONS};
use crate::normalize::{normalize, Normalized};
use crate::render::{self, OutputFormat};
use crate::state::ViewState;

/// Flags of the `view` command.
#[derive(Debug, Clone, Default)]
pub struct ViewOptions {
    pub group: Option<GroupingMode>,
    pub severity: Vec<String>,
    pub search: Option<String>,
    pub search_scope: Option<SearchScope>,
    pub format: OutputFormat,
    pub fail_on_violations: bool,
}

fn load(input: &InputArgs) -> Result<Normalized> {
    let text = acquire::load_report(&input.input, input.encoding)
        .with_context(|| format!("Failed to load report {}", input.input.display()))?;
    Ok(normalize(&text))
}

/// Builds the view state the flags describe, applying interactions in order.
#[must_use]
pub fn build_state(report: Normalized, mut config: ViewConfig, opts: &ViewOptions) -> ViewState {
    if let Some(scope) = opts.search_scope {
        config.view.search_scope = scope;
    }
    let mut state = ViewState::new(report, config);
    if let Some(mode) = opts.group {
        state = state.group_by(mode);
    }
    for level in &opts.severity {
        state = state.toggle_severity(level);
    }
    if let Some(term) = &opts.search {
        state = state.search(term);
    }
    state
}

/// Handles the `view` command.
///
/// # Errors
/// Returns error if the report cannot be loaded or rendered.
pub fn handle_view(
    input: &InputArgs,
    config: ViewConfig,
    opts: &ViewOptions,
) -> Result<ScanlensExit> {
    let state = build_state(load(input)?, config, opts);
    let view = state.render();
    let out = render::render(&view, opts.format).context("Failed to render view")?;
    print!("{out}");

    if opts.fail_on_violations && view.record_count > 0 {
        return Ok(ScanlensExit::ViolationsFound);
    }
    Ok(ScanlensExit::Success)
}

/// Handles the `summary` command.
///
/// # Errors
/// Returns error if the report cannot be loaded or serialized.
pub fn handle_summary(input: &InputArgs, config: ViewConfig, json: bool) -> Result<ScanlensExit> {
    let state = ViewState::new(load(input)?, config);
    let levels = state.severity_levels();
    let mode = state.report().payload.mode_name();
    let count = state.record_count();
    let grouping = state.grouping();

    if json {
        let value = serde_json::json!({
            "mode": mode,
            "recordCount": count,
            "grouping": grouping.as_str(),
            "severityLevels": levels,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(ScanlensExit::Success);
    }

    println!("{} {mode}", "Mode:".bold());
    println!("{} {count}", "Violations:".bold());
    println!("{} {}", "Grouping:".bold(), grouping.label());
    for level in &levels {
        println!("  {}", level.label);
    }
    Ok(ScanlensExit::Success)
}

/// Handles the `engines` command.
///
/// # Errors
/// Never fails; returns `Result` for dispatch symmetry.
pub fn handle_engines() -> Result<ScanlensExit> {
    for (name, description) in ENGINE_DESCRIPTIONS {
        println!("{:<10} {}", name.bold(), description);
    }
    Ok(ScanlensExit::Success)
}
