// src/pm/mod.rs

//! Small project-management calculators that sit next to the scheduler.

pub mod earned_value;
pub mod risk;
pub mod wbs;

pub use earned_value::{CostStatus, EarnedValue, EarnedValueInput, ScheduleStatus, earned_value};
pub use risk::{RiskAssessment, RiskLevel, assess_risk};
pub use wbs::{EXAMPLE_CODES, WbsCode, WbsNode, outline, parse_hierarchy};
