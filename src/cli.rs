// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::types::OutputFormat;

/// Command-line arguments for `depdag`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "depdag",
    version,
    about = "Dependency cycle analysis, critical path scheduling and project metrics.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Depdag.toml` in the current working directory, if present.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `DEPDAG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Detect dependency cycles and report module coupling.
    Cycles(CyclesArgs),

    /// Compute the critical path of a task network.
    Schedule(ScheduleArgs),

    /// Score a risk on the 5x5 probability/impact matrix.
    Risk(RiskArgs),

    /// Earned value analysis.
    Ev(EvArgs),

    /// Number a work breakdown structure or print a WBS tree.
    Wbs(WbsArgs),
}

/// Options shared by every subcommand that prints a report.
#[derive(Debug, Clone, Args)]
pub struct OutputArgs {
    /// Report format; overrides `[report].format`.
    #[arg(long, short = 'f', value_enum)]
    pub format: Option<OutputFormat>,

    /// Write the report to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Decimal places for printed numbers; overrides `[report].precision`.
    #[arg(long, value_name = "N")]
    pub precision: Option<usize>,
}

#[derive(Debug, Clone, Args)]
pub struct CyclesArgs {
    /// JSON dependency map: `{"module": ["dependency", ...]}`.
    #[arg(long, short = 'i', value_name = "PATH")]
    pub input: PathBuf,

    /// Coupling threshold (0-1); overrides `[cycles].coupling_threshold`.
    #[arg(long, short = 't', value_name = "F")]
    pub threshold: Option<f64>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Clone, Args)]
pub struct ScheduleArgs {
    /// JSON task list: `[{"id": .., "duration": .., "dependencies": [..]}]`.
    ///
    /// Without it, a small built-in demo network is scheduled.
    #[arg(long, short = 'i', value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Project start date; adds a Gantt table with calendar dates.
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub start_date: Option<NaiveDate>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Clone, Args)]
pub struct RiskArgs {
    /// Probability, 1-5.
    #[arg(long)]
    pub probability: u8,

    /// Impact, 1-5.
    #[arg(long)]
    pub impact: u8,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Clone, Args)]
pub struct EvArgs {
    /// Budget at completion.
    #[arg(long)]
    pub bac: f64,

    /// Planned value.
    #[arg(long)]
    pub pv: f64,

    /// Earned value.
    #[arg(long)]
    pub ev: f64,

    /// Actual cost.
    #[arg(long)]
    pub ac: f64,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Clone, Args)]
pub struct WbsArgs {
    /// WBS codes (e.g. `1 1.1 1.2 2`) to arrange into a tree.
    ///
    /// Without codes, a numbered skeleton of phases and work packages is
    /// generated.
    #[arg(value_name = "CODE", conflicts_with = "example")]
    pub codes: Vec<String>,

    /// Show the tree for a built-in example set of codes.
    #[arg(long)]
    pub example: bool,

    /// Phases in the generated skeleton.
    #[arg(long, default_value_t = 3)]
    pub phases: u32,

    /// Work packages per phase in the generated skeleton.
    #[arg(long, default_value_t = 2)]
    pub packages: u32,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn schedule_without_input_parses() {
        let args = CliArgs::try_parse_from(["depdag", "schedule"]).unwrap();
        match args.command {
            Command::Schedule(s) => {
                assert!(s.input.is_none());
                assert!(s.start_date.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn start_date_is_parsed_as_calendar_date() {
        let args =
            CliArgs::try_parse_from(["depdag", "schedule", "--start-date", "2025-01-06"]).unwrap();
        match args.command {
            Command::Schedule(s) => {
                assert_eq!(s.start_date, NaiveDate::from_ymd_opt(2025, 1, 6));
            }
            other => panic!("unexpected command {other:?}"),
        }

        assert!(CliArgs::try_parse_from(["depdag", "schedule", "--start-date", "2025-13-01"]).is_err());
    }

    #[test]
    fn wbs_codes_conflict_with_example() {
        assert!(CliArgs::try_parse_from(["depdag", "wbs", "1", "--example"]).is_err());

        let args = CliArgs::try_parse_from(["depdag", "wbs", "1", "1.2"]).unwrap();
        match args.command {
            Command::Wbs(w) => {
                assert_eq!(w.codes, vec!["1", "1.2"]);
                assert_eq!((w.phases, w.packages), (3, 2));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let args = CliArgs::try_parse_from([
            "depdag",
            "cycles",
            "--input",
            "deps.json",
            "--format",
            "json",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert!(matches!(args.log_level, Some(LogLevel::Debug)));
        match args.command {
            Command::Cycles(c) => {
                assert_eq!(c.output.format, Some(OutputFormat::Json));
                assert_eq!(c.input, PathBuf::from("deps.json"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
