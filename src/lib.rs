// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod errors;
pub mod input;
pub mod logging;
pub mod pm;
pub mod report;
pub mod schedule;
pub mod types;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{debug, info};

use crate::cli::{
    CliArgs, Command, CyclesArgs, EvArgs, OutputArgs, RiskArgs, ScheduleArgs, WbsArgs,
};
use crate::config::ConfigFile;
use crate::config::load_or_default;
use crate::config::validate::MAX_PRECISION;
use crate::input::{RawTask, RawTaskList, TaskList, load_dependency_map, load_task_list};
use crate::pm::EarnedValueInput;
use crate::report::ReportOptions;
use crate::schedule::{Scheduler, critical_chains, gantt_rows};

pub use crate::dag::{DependencyAnalysis, analyze, detect_cycles};
pub use crate::errors::DepdagError;
pub use crate::schedule::{Schedule, compute_schedule};

/// High-level entry point used by `main.rs`.
///
/// Resolves configuration, runs the selected subcommand and emits its
/// report to stdout or to `--output`.
pub fn run(args: CliArgs) -> Result<()> {
    let cfg = load_or_default(args.config.as_deref())?;
    debug!(?cfg, "configuration resolved");

    let (report, output) = match &args.command {
        Command::Cycles(c) => (run_cycles(&cfg, c)?, &c.output),
        Command::Schedule(s) => (run_schedule(&cfg, s)?, &s.output),
        Command::Risk(r) => (run_risk(&cfg, r)?, &r.output),
        Command::Ev(e) => (run_ev(&cfg, e)?, &e.output),
        Command::Wbs(w) => (run_wbs(&cfg, w)?, &w.output),
    };

    emit(&report, output.output.as_deref())
}

fn run_cycles(cfg: &ConfigFile, args: &CyclesArgs) -> Result<String> {
    let threshold = args.threshold.unwrap_or(cfg.cycles.coupling_threshold);
    if !(0.0..=1.0).contains(&threshold) {
        bail!("--threshold must be within 0.0..=1.0 (got {threshold})");
    }

    let map = load_dependency_map(&args.input)
        .with_context(|| format!("failed to load dependency map {}", args.input.display()))?;

    let analysis = analyze(&map, threshold);
    let opts = report_options(cfg, &args.output)?;
    Ok(report::render_analysis(&analysis, &opts)?)
}

fn run_schedule(cfg: &ConfigFile, args: &ScheduleArgs) -> Result<String> {
    let tasks = match &args.input {
        Some(path) => load_task_list(path)
            .with_context(|| format!("failed to load task list {}", path.display()))?,
        None => {
            info!("no --input given; scheduling the built-in demo network");
            demo_task_list()?
        }
    };

    let schedule = Scheduler::new(cfg.schedule.slack_epsilon).schedule(&tasks)?;
    let chains = critical_chains(&schedule);
    let gantt = args
        .start_date
        .map(|start| gantt_rows(&schedule, start))
        .transpose()?;
    let opts = report_options(cfg, &args.output)?;
    Ok(report::render_schedule(
        &schedule,
        &chains,
        gantt.as_deref(),
        &opts,
    )?)
}

fn run_risk(cfg: &ConfigFile, args: &RiskArgs) -> Result<String> {
    let assessment = pm::assess_risk(args.probability, args.impact)?;
    let opts = report_options(cfg, &args.output)?;
    Ok(report::render_risk(&assessment, &opts)?)
}

fn run_ev(cfg: &ConfigFile, args: &EvArgs) -> Result<String> {
    let input = EarnedValueInput {
        bac: args.bac,
        pv: args.pv,
        ev: args.ev,
        ac: args.ac,
    };
    let result = pm::earned_value(input)?;
    let opts = report_options(cfg, &args.output)?;
    Ok(report::render_earned_value(&input, &result, &opts)?)
}

fn run_wbs(cfg: &ConfigFile, args: &WbsArgs) -> Result<String> {
    let tree = if args.example {
        pm::parse_hierarchy(&pm::EXAMPLE_CODES)?
    } else if args.codes.is_empty() {
        pm::outline(args.phases, args.packages)
    } else {
        pm::parse_hierarchy(args.codes.as_slice())?
    };
    let opts = report_options(cfg, &args.output)?;
    Ok(report::render_wbs(&tree, &opts)?)
}

/// Merge config defaults with per-invocation CLI overrides.
fn report_options(cfg: &ConfigFile, args: &OutputArgs) -> Result<ReportOptions> {
    let mut opts = ReportOptions::from_config(cfg);

    if let Some(format) = args.format {
        opts.format = format;
    }
    if let Some(precision) = args.precision {
        if precision > MAX_PRECISION {
            bail!("--precision must be <= {MAX_PRECISION} (got {precision})");
        }
        opts.precision = precision;
    }

    Ok(opts)
}

fn emit(report: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, report)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            println!("Report written to: {}", path.display());
        }
        None => println!("{report}"),
    }
    Ok(())
}

/// The four-task network used when `schedule` runs without `--input`:
/// A(3), B(4) after A, C(2) after A, D(5) after B and C.
pub fn demo_task_list() -> errors::Result<TaskList> {
    let task = |id: &str, duration: f64, deps: &[&str]| RawTask {
        id: id.to_string(),
        duration,
        dependencies: deps.iter().map(|d| d.to_string()).collect(),
    };

    TaskList::try_from(RawTaskList(vec![
        task("A", 3.0, &[]),
        task("B", 4.0, &["A"]),
        task("C", 2.0, &["A"]),
        task("D", 5.0, &["B", "C"]),
    ]))
}
