// src/config/model.rs

use serde::Deserialize;

use crate::schedule::DEFAULT_SLACK_EPSILON;
use crate::types::OutputFormat;

/// Top-level configuration as read from `Depdag.toml`.
///
/// ```toml
/// [report]
/// format = "text"
/// precision = 2
///
/// [cycles]
/// coupling_threshold = 0.3
/// max_listed = 5
///
/// [schedule]
/// slack_epsilon = 1e-9
/// ```
///
/// All sections are optional and have reasonable defaults. This is the raw,
/// unvalidated form; convert it with `ConfigFile::try_from`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub report: ReportSection,

    #[serde(default)]
    pub cycles: CyclesSection,

    #[serde(default)]
    pub schedule: ScheduleSection,
}

/// Validated configuration. Only constructible through `TryFrom<RawConfigFile>`
/// (or `Default`, which is valid by construction).
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    pub report: ReportSection,
    pub cycles: CyclesSection,
    pub schedule: ScheduleSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        report: ReportSection,
        cycles: CyclesSection,
        schedule: ScheduleSection,
    ) -> Self {
        Self {
            report,
            cycles,
            schedule,
        }
    }
}

/// `[report]` section: presentation defaults shared by every subcommand.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportSection {
    #[serde(default)]
    pub format: OutputFormat,

    /// Decimal places used when printing times and ratios.
    #[serde(default = "default_precision")]
    pub precision: usize,
}

fn default_precision() -> usize {
    2
}

impl Default for ReportSection {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            precision: default_precision(),
        }
    }
}

/// `[cycles]` section: dependency analysis knobs.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CyclesSection {
    /// Modules whose coupling is strictly above this are flagged.
    #[serde(default = "default_coupling_threshold")]
    pub coupling_threshold: f64,

    /// How many cycles the text report lists before summarising the rest.
    #[serde(default = "default_max_listed")]
    pub max_listed: usize,
}

fn default_coupling_threshold() -> f64 {
    0.3
}

fn default_max_listed() -> usize {
    5
}

impl Default for CyclesSection {
    fn default() -> Self {
        Self {
            coupling_threshold: default_coupling_threshold(),
            max_listed: default_max_listed(),
        }
    }
}

/// `[schedule]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScheduleSection {
    /// Slack at or below this magnitude counts as zero.
    #[serde(default = "default_slack_epsilon")]
    pub slack_epsilon: f64,
}

fn default_slack_epsilon() -> f64 {
    DEFAULT_SLACK_EPSILON
}

impl Default for ScheduleSection {
    fn default() -> Self {
        Self {
            slack_epsilon: default_slack_epsilon(),
        }
    }
}
