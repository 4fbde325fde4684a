// src/pm/risk.rs

use std::fmt;

use serde::Serialize;

use crate::errors::{DepdagError, Result};

/// Accepted range for both probability and impact.
pub const SCALE: std::ops::RangeInclusive<u8> = 1..=5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    fn from_score(score: u8) -> Self {
        if score >= 15 {
            RiskLevel::High
        } else if score >= 8 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn recommended_action(&self) -> &'static str {
        match self {
            RiskLevel::High => "act immediately",
            RiskLevel::Medium => "prepare a response plan",
            RiskLevel::Low => "monitor periodically",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => f.write_str("low"),
            RiskLevel::Medium => f.write_str("medium"),
            RiskLevel::High => f.write_str("high"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskAssessment {
    pub probability: u8,
    pub impact: u8,
    pub score: u8,
    pub level: RiskLevel,
    pub action: &'static str,
}

/// Score a risk on the 5x5 probability/impact matrix.
pub fn assess_risk(probability: u8, impact: u8) -> Result<RiskAssessment> {
    for (name, value) in [("probability", probability), ("impact", impact)] {
        if !SCALE.contains(&value) {
            return Err(DepdagError::Validation(format!(
                "{name} must be within {}..={} (got {value})",
                SCALE.start(),
                SCALE.end()
            )));
        }
    }

    let score = probability * impact;
    let level = RiskLevel::from_score(score);

    Ok(RiskAssessment {
        probability,
        impact,
        score,
        level,
        action: level.recommended_action(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_boundaries() {
        assert_eq!(assess_risk(3, 5).unwrap().level, RiskLevel::High); // 15
        assert_eq!(assess_risk(2, 4).unwrap().level, RiskLevel::Medium); // 8
        assert_eq!(assess_risk(3, 4).unwrap().level, RiskLevel::Medium); // 12
        assert_eq!(assess_risk(1, 5).unwrap().level, RiskLevel::Low); // 5
        assert_eq!(assess_risk(2, 3).unwrap().level, RiskLevel::Low); // 6
        assert_eq!(assess_risk(5, 5).unwrap().score, 25);
    }

    #[test]
    fn out_of_scale_inputs_are_rejected() {
        match assess_risk(0, 3) {
            Err(DepdagError::Validation(msg)) => assert!(msg.contains("probability")),
            other => panic!("expected Validation error, got {other:?}"),
        }
        match assess_risk(3, 6) {
            Err(DepdagError::Validation(msg)) => assert!(msg.contains("impact")),
            other => panic!("expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn action_follows_level() {
        let high = assess_risk(4, 4).unwrap();
        assert_eq!(high.action, "act immediately");
    }
}
