//! gumbotree CLI
//!
//! Parses markup files and inspects them with node iterators and tree walkers.

mod cli;
mod commands;
mod output;

use std::process::ExitCode;

use clap::Parser;
use miette::Result;
use tracing::error;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(not_found) => {
            if not_found {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

/// Runs the selected command. `Ok(true)` means a search found nothing.
fn run(cli: Cli) -> Result<bool> {
    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Dump { file, show, format } => {
            commands::dump::run_dump(&file, show, format, &config).map(|_| false)
        }
        Commands::Search {
            file,
            needle,
            ignore_case,
            no_descend,
        } => commands::search::run_search(&file, &needle, ignore_case, no_descend, &config),
        Commands::Walk { file, show } => {
            commands::walk::run_walk(&file, show, &config).map(|_| false)
        }
    }
}
