// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{DepdagError, Result};

/// Largest accepted `[report].precision`.
pub const MAX_PRECISION: usize = 9;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = DepdagError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.report, raw.cycles, raw.schedule))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_report(cfg)?;
    validate_cycles(cfg)?;
    validate_schedule(cfg)?;
    Ok(())
}

fn validate_report(cfg: &RawConfigFile) -> Result<()> {
    if cfg.report.precision > MAX_PRECISION {
        return Err(DepdagError::Config(format!(
            "[report].precision must be <= {MAX_PRECISION} (got {})",
            cfg.report.precision
        )));
    }
    Ok(())
}

fn validate_cycles(cfg: &RawConfigFile) -> Result<()> {
    let threshold = cfg.cycles.coupling_threshold;
    if !(0.0..=1.0).contains(&threshold) {
        return Err(DepdagError::Config(format!(
            "[cycles].coupling_threshold must be within 0.0..=1.0 (got {threshold})"
        )));
    }

    if cfg.cycles.max_listed == 0 {
        return Err(DepdagError::Config(
            "[cycles].max_listed must be >= 1 (got 0)".to_string(),
        ));
    }

    Ok(())
}

fn validate_schedule(cfg: &RawConfigFile) -> Result<()> {
    let eps = cfg.schedule.slack_epsilon;
    if !eps.is_finite() || eps < 0.0 {
        return Err(DepdagError::Config(format!(
            "[schedule].slack_epsilon must be a finite number >= 0 (got {eps})"
        )));
    }
    Ok(())
}
