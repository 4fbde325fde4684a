// src/report/mod.rs

//! Rendering of analysis results.
//!
//! Algorithms hand over unrounded numbers; rounding to `precision` decimal
//! places happens here and only here.

pub mod json;
pub mod text;

use crate::config::ConfigFile;
use crate::dag::DependencyAnalysis;
use crate::errors::Result;
use crate::pm::{EarnedValue, EarnedValueInput, RiskAssessment, WbsNode};
use crate::schedule::{GanttRow, Schedule};
use crate::types::OutputFormat;

/// Calendar date layout used in Gantt output.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Presentation knobs shared by every report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportOptions {
    pub format: OutputFormat,
    pub precision: usize,
    /// Cycles listed in text output before the remainder is summarised.
    pub max_listed: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self::from_config(&ConfigFile::default())
    }
}

impl ReportOptions {
    pub fn from_config(cfg: &ConfigFile) -> Self {
        Self {
            format: cfg.report.format,
            precision: cfg.report.precision,
            max_listed: cfg.cycles.max_listed,
        }
    }
}

/// Round half away from zero to `precision` decimal places.
pub fn round_to(value: f64, precision: usize) -> f64 {
    let factor = 10f64.powi(precision as i32);
    let rounded = (value * factor).round() / factor;
    // Avoid printing "-0.00" for tiny negative noise.
    if rounded == 0.0 { 0.0 } else { rounded }
}

pub fn render_analysis(analysis: &DependencyAnalysis, opts: &ReportOptions) -> Result<String> {
    match opts.format {
        OutputFormat::Text => Ok(text::analysis(analysis, opts)),
        OutputFormat::Json => json::analysis(analysis, opts),
    }
}

pub fn render_schedule(
    schedule: &Schedule,
    chains: &[Vec<String>],
    gantt: Option<&[GanttRow]>,
    opts: &ReportOptions,
) -> Result<String> {
    match opts.format {
        OutputFormat::Text => Ok(text::schedule(schedule, chains, gantt, opts)),
        OutputFormat::Json => json::schedule(schedule, chains, gantt, opts),
    }
}

pub fn render_risk(risk: &RiskAssessment, opts: &ReportOptions) -> Result<String> {
    match opts.format {
        OutputFormat::Text => Ok(text::risk(risk)),
        OutputFormat::Json => json::risk(risk),
    }
}

pub fn render_earned_value(
    input: &EarnedValueInput,
    result: &EarnedValue,
    opts: &ReportOptions,
) -> Result<String> {
    match opts.format {
        OutputFormat::Text => Ok(text::earned_value(input, result, opts)),
        OutputFormat::Json => json::earned_value(input, result, opts),
    }
}

pub fn render_wbs(tree: &[WbsNode], opts: &ReportOptions) -> Result<String> {
    match opts.format {
        OutputFormat::Text => Ok(text::wbs(tree)),
        OutputFormat::Json => json::wbs(tree),
    }
}
