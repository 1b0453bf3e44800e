use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::acquire::{Encoding, OUTPUT_FILE_NAME};
use crate::filter::SearchScope;
use crate::grouping::GroupingMode;
use crate::render::OutputFormat;

#[derive(Parser)]
#[command(name = "scanlens", version, about = "Browse static-analysis violation reports")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
    /// Config file to use instead of ./scanlens.toml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Log pipeline decisions to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Where the report comes from and how it is encoded.
#[derive(clap::Args, Debug, Clone)]
pub struct InputArgs {
    /// Report file, or `-` for stdin
    #[arg(default_value = OUTPUT_FILE_NAME)]
    pub input: PathBuf,
    /// Transport encoding of the stored report
    #[arg(long, value_enum, default_value_t = Encoding::Plain)]
    pub encoding: Encoding,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Normalize, filter and display a report
    View {
        #[command(flatten)]
        input: InputArgs,
        /// Grouping mode (defaults to the configured one)
        #[arg(long, short, value_enum)]
        group: Option<GroupingMode>,
        /// Severity to show; passing the same level twice clears it again
        #[arg(long, short, value_name = "LEVEL")]
        severity: Vec<String>,
        /// Case-insensitive substring filter
        #[arg(long, short = 'q')]
        search: Option<String>,
        /// Which fields the search term is matched against
        #[arg(long, value_enum)]
        search_scope: Option<SearchScope>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Exit with code 3 when any violation is left after filtering
        #[arg(long)]
        fail_on_violations: bool,
    },
    /// Print the display mode, record count and severity summary
    Summary {
        #[command(flatten)]
        input: InputArgs,
        #[arg(long)]
        json: bool,
    },
    /// List the engines with known descriptions
    Engines,
}
