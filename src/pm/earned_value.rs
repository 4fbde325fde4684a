// src/pm/earned_value.rs

//! Earned value analysis.
//!
//! Performance indices use a +/-5% band around 1.0 as "on track".

use serde::Serialize;

use crate::errors::{DepdagError, Result};

const AHEAD_THRESHOLD: f64 = 1.05;
const BEHIND_THRESHOLD: f64 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EarnedValueInput {
    /// Budget at completion.
    pub bac: f64,
    /// Planned value.
    pub pv: f64,
    /// Earned value.
    pub ev: f64,
    /// Actual cost.
    pub ac: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    Ahead,
    OnTrack,
    Behind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CostStatus {
    UnderBudget,
    OnBudget,
    OverBudget,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EarnedValue {
    pub sv: f64,
    pub cv: f64,
    pub spi: f64,
    pub cpi: f64,
    pub eac: f64,
    pub etc: f64,
    pub vac: f64,
    pub schedule: ScheduleStatus,
    pub cost: CostStatus,
}

pub fn earned_value(input: EarnedValueInput) -> Result<EarnedValue> {
    let EarnedValueInput { bac, pv, ev, ac } = input;

    for (name, value) in [("bac", bac), ("pv", pv), ("ev", ev), ("ac", ac)] {
        if !value.is_finite() || value < 0.0 {
            return Err(DepdagError::Validation(format!(
                "{name} must be a finite number >= 0 (got {value})"
            )));
        }
    }

    let sv = ev - pv;
    let cv = ev - ac;

    let spi = if pv > 0.0 { ev / pv } else { 0.0 };
    let cpi = if ac > 0.0 { ev / ac } else { 0.0 };

    let eac = if cpi > 0.0 { bac / cpi } else { bac };
    let etc = eac - ac;
    let vac = bac - eac;

    let schedule = if spi > AHEAD_THRESHOLD {
        ScheduleStatus::Ahead
    } else if spi >= BEHIND_THRESHOLD {
        ScheduleStatus::OnTrack
    } else {
        ScheduleStatus::Behind
    };

    let cost = if cpi > AHEAD_THRESHOLD {
        CostStatus::UnderBudget
    } else if cpi >= BEHIND_THRESHOLD {
        CostStatus::OnBudget
    } else {
        CostStatus::OverBudget
    };

    Ok(EarnedValue {
        sv,
        cv,
        spi,
        cpi,
        eac,
        etc,
        vac,
        schedule,
        cost,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn behind_schedule_and_over_budget() {
        let r = earned_value(EarnedValueInput {
            bac: 100_000.0,
            pv: 50_000.0,
            ev: 40_000.0,
            ac: 45_000.0,
        })
        .unwrap();

        assert!(approx(r.sv, -10_000.0));
        assert!(approx(r.cv, -5_000.0));
        assert!(approx(r.spi, 0.8));
        assert!(approx(r.cpi, 40.0 / 45.0));
        assert!(approx(r.eac, 112_500.0));
        assert!(approx(r.etc, 67_500.0));
        assert!(approx(r.vac, -12_500.0));
        assert_eq!(r.schedule, ScheduleStatus::Behind);
        assert_eq!(r.cost, CostStatus::OverBudget);
    }

    #[test]
    fn zero_denominators_fall_back() {
        let r = earned_value(EarnedValueInput {
            bac: 1_000.0,
            pv: 0.0,
            ev: 0.0,
            ac: 0.0,
        })
        .unwrap();

        assert_eq!(r.spi, 0.0);
        assert_eq!(r.cpi, 0.0);
        assert_eq!(r.eac, 1_000.0);
        assert_eq!(r.vac, 0.0);
    }

    #[test]
    fn on_track_band_is_inclusive_at_lower_edge() {
        let r = earned_value(EarnedValueInput {
            bac: 100.0,
            pv: 100.0,
            ev: 95.0,
            ac: 95.0,
        })
        .unwrap();
        assert_eq!(r.schedule, ScheduleStatus::OnTrack);
        assert_eq!(r.cost, CostStatus::OnBudget);
    }

    #[test]
    fn negative_input_is_rejected() {
        let err = earned_value(EarnedValueInput {
            bac: 100.0,
            pv: -1.0,
            ev: 0.0,
            ac: 0.0,
        });
        match err {
            Err(DepdagError::Validation(msg)) => assert!(msg.contains("pv")),
            other => panic!("expected Validation error, got {other:?}"),
        }
    }
}
