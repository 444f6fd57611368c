//! Command-line argument structures.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config_cmd::{CheckConfigCli, PrintDefaultConfigCli};
use crate::replay_cmd::ReplayCli;
use crate::run_cmd::RunCli;

/// Log verbosity level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    /// Only show errors
    Error,
    /// Show warnings and errors (default)
    #[default]
    Warn,
    /// Show informational messages, warnings, and errors
    Info,
    /// Show debug messages and above
    Debug,
    /// Show all messages including trace-level details
    Trace,
}

impl LogLevel {
    /// Convert to tracing filter string.
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Limited WIP: auto-revert, change size watchdog and TCR for any editor
/// that speaks JSON lines.
#[derive(Debug, Parser)]
#[command(name = "limitedwip")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file [default: ~/.limitedwip/limitedwip.toml]
    #[arg(long, short, global = true, env = "LIMITEDWIP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level; RUST_LOG takes precedence
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::default())]
    pub log_level: LogLevel,

    /// Log as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Load and validate the settings file
    CheckConfig(CheckConfigCli),

    /// Print the default settings as TOML
    PrintDefaultConfig(PrintDefaultConfigCli),

    /// Feed a JSON-lines event file through a session and print the actions
    Replay(ReplayCli),

    /// Run with a real timer, reading events from stdin
    Run(RunCli),
}

/// Output options shared by `replay` and `run`.
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct OutputArgs {
    /// Also print toolbar refreshes, which happen on every tick
    #[arg(long)]
    pub toolbar: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "limitedwip",
            "replay",
            "events.jsonl",
            "--log-level",
            "debug",
            "--config",
            "custom.toml",
            "--toolbar",
        ])
        .unwrap();

        assert_eq!(cli.log_level, LogLevel::Debug);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        let Commands::Replay(replay) = cli.command else {
            panic!("expected replay");
        };
        assert_eq!(replay.file, PathBuf::from("events.jsonl"));
        assert!(replay.output.toolbar);
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["limitedwip", "run"]).unwrap();
        assert_eq!(cli.log_level.as_filter_str(), "warn");
        assert!(!cli.json_logs);
        let Commands::Run(run) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(run.period_ms, 500);
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Cli::try_parse_from(["limitedwip"]).is_err());
    }
}
