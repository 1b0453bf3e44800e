use clap::Parser;
use colored::Colorize;
use scanlens_core::cli::{self, Cli};
use scanlens_core::exit::ScanlensExit;

fn main() -> ScanlensExit {
    let cli = Cli::parse();
    cli::logging::init(cli.verbose);

    match cli::dispatch::execute(cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ScanlensExit::for_error(&e)
        }
    }
}
