// src/schedule/mod.rs

//! Critical path scheduling.
//!
//! - [`critical_path`] runs the forward and backward passes and derives slack.
//! - [`chains`] strings the zero-slack tasks together along dependency edges
//!   for presentation.
//! - [`gantt`] places the computed times on a calendar.

pub mod chains;
pub mod critical_path;
pub mod gantt;

pub use chains::critical_chains;
pub use critical_path::{DEFAULT_SLACK_EPSILON, Schedule, Scheduler, TaskTiming, compute_schedule};
pub use gantt::{GanttRow, gantt_rows};
