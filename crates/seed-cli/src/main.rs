//! seedsync CLI
//!
//! Resolves image URLs for the seed jobs and rewrites their SQL blocks.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Sync(args) => commands::run_sync(&args),
        Commands::List { config } => commands::run_list(config.as_deref()),
    }
}
