//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use seed_core::SettingsLayer;

/// seedsync - keep the image rows of SQL seed files in sync
#[derive(Parser, Debug)]
#[command(name = "seedsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Resolve the rows of a job and rewrite its block
    ///
    /// Without --write the new block (or, with --diff, a diff of the whole
    /// file) is printed and nothing is modified.
    ///
    /// Examples:
    ///   seedsync sync attraction-images --sql data.sql
    ///   seedsync sync destination-images --sql data.sql --write --strict
    ///   seedsync sync hotel-images --sql data.sql --offline --diff
    Sync(SyncArgs),

    /// List built-in and configured jobs
    List {
        /// Config file with extra jobs (TOML, JSON or YAML)
        #[arg(long, env = "SEEDSYNC_CONFIG", value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct SyncArgs {
    /// Job to run (see `seedsync list`)
    pub job: String,

    /// Seed file to read and, with --write, rewrite
    #[arg(long, value_name = "PATH")]
    pub sql: PathBuf,

    /// Write the updated file instead of printing the block
    #[arg(long)]
    pub write: bool,

    /// Seconds between provider calls [default: 0.15]
    #[arg(long, value_name = "SECS", allow_negative_numbers = true)]
    pub sleep: Option<f64>,

    /// Seconds allowed for one provider call, at least 1 [default: 6]
    #[arg(long, value_name = "SECS")]
    pub request_timeout: Option<f64>,

    /// Fail when any row falls back to an existing or synthetic value
    #[arg(long)]
    pub strict: bool,

    /// Skip provider lookups entirely
    #[arg(long)]
    pub offline: bool,

    /// Print a unified diff of the file instead of the bare block
    #[arg(long, conflicts_with = "write")]
    pub diff: bool,

    /// Config file with settings and extra jobs (TOML, JSON or YAML)
    #[arg(long, env = "SEEDSYNC_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl SyncArgs {
    /// Settings given on the command line; unset flags leave file values alone.
    pub fn settings_layer(&self) -> SettingsLayer {
        SettingsLayer {
            sleep: self.sleep,
            request_timeout: self.request_timeout,
            strict: self.strict.then_some(true),
            user_agent: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn sync_args(args: &[&str]) -> SyncArgs {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Sync(args) => args,
            other => panic!("expected sync, got {other:?}"),
        }
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_sync_defaults() {
        let args = sync_args(&["seedsync", "sync", "attraction-images", "--sql", "data.sql"]);

        assert_eq!(args.job, "attraction-images");
        assert_eq!(args.sql, PathBuf::from("data.sql"));
        assert!(!args.write && !args.strict && !args.offline && !args.diff);
        assert_eq!(args.settings_layer(), SettingsLayer::default());
    }

    #[test]
    fn parse_sync_flags_into_settings_layer() {
        let args = sync_args(&[
            "seedsync",
            "sync",
            "destination-images",
            "--sql",
            "data.sql",
            "--sleep",
            "0",
            "--request-timeout",
            "2.5",
            "--strict",
        ]);

        let layer = args.settings_layer();
        assert_eq!(layer.sleep, Some(0.0));
        assert_eq!(layer.request_timeout, Some(2.5));
        assert_eq!(layer.strict, Some(true));
    }

    #[test]
    fn parse_verbose_after_subcommand() {
        let cli = Cli::try_parse_from(["seedsync", "list", "-v"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn sync_requires_sql() {
        assert!(Cli::try_parse_from(["seedsync", "sync", "hotel-images"]).is_err());
    }

    #[test]
    fn diff_conflicts_with_write() {
        let result = Cli::try_parse_from([
            "seedsync",
            "sync",
            "hotel-images",
            "--sql",
            "data.sql",
            "--write",
            "--diff",
        ]);
        assert!(result.is_err());
    }
}
