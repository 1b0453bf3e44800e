//! Command dispatch logic extracted from binary to reduce main function size.

use super::args::{Cli, Commands};
use super::handlers::{handle_engines, handle_summary, handle_view, ViewOptions};
use crate::config::ViewConfig;
use crate::exit::ScanlensExit;
use anyhow::{Context, Result};

/// Executes the parsed command.
///
/// # Errors
/// Returns error if the command handler fails.
pub fn execute(cli: Cli) -> Result<ScanlensExit> {
    let config = load_config(&cli)?;
    match cli.command {
        Some(Commands::View {
            input,
            group,
            severity,
            search,
            search_scope,
            format,
            fail_on_violations,
        }) => handle_view(
            &input,
            config,
            &ViewOptions {
                group,
                severity,
                search,
                search_scope,
                format,
                fail_on_violations,
            },
        ),
        Some(Commands::Summary { input, json }) => handle_summary(&input, config, json),
        Some(Commands::Engines) => handle_engines(),
        None => {
            use clap::CommandFactory;
            let _ = Cli::command().print_help();
            Ok(ScanlensExit::Success)
        }
    }
}

fn load_config(cli: &Cli) -> Result<ViewConfig> {
    match &cli.config {
        Some(path) => ViewConfig::from_path(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(ViewConfig::load()),
    }
}
