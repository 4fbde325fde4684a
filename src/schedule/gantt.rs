// src/schedule/gantt.rs

//! Calendar view of a computed schedule.
//!
//! Durations are in days. Each task starts `earliest_start` days after the
//! project start date and ends `earliest_finish` days after it; fractional
//! days fall on the calendar day they land in.

use chrono::{NaiveDate, NaiveTime, TimeDelta};

use crate::errors::{DepdagError, Result};
use crate::schedule::Schedule;
use crate::types::TaskId;

const SECONDS_PER_DAY: f64 = 86_400.0;

#[derive(Debug, Clone, PartialEq)]
pub struct GanttRow {
    pub id: TaskId,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub duration: f64,
    pub critical: bool,
}

/// Dated start/end rows for every task, in the schedule's topological order.
pub fn gantt_rows(schedule: &Schedule, start: NaiveDate) -> Result<Vec<GanttRow>> {
    schedule
        .tasks
        .iter()
        .map(|t| -> Result<GanttRow> {
            Ok(GanttRow {
                id: t.id.clone(),
                start: date_after(start, t.earliest_start)?,
                end: date_after(start, t.earliest_finish)?,
                duration: t.duration,
                critical: schedule.is_critical(&t.id),
            })
        })
        .collect()
}

fn date_after(start: NaiveDate, days: f64) -> Result<NaiveDate> {
    let seconds = (days * SECONDS_PER_DAY).round() as i64;
    TimeDelta::try_seconds(seconds)
        .and_then(|delta| start.and_time(NaiveTime::MIN).checked_add_signed(delta))
        .map(|dt| dt.date())
        .ok_or_else(|| {
            DepdagError::Validation(format!(
                "{days} days after {start} is outside the supported date range"
            ))
        })
}
