// src/schedule/critical_path.rs

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::{debug, info, warn};

use crate::dag::{DependencyGraph, detect_cycles};
use crate::errors::{DepdagError, Result};
use crate::input::{TaskList, TaskSpec};
use crate::types::TaskId;

/// Slack at or below this magnitude is treated as zero.
pub const DEFAULT_SLACK_EPSILON: f64 = 1e-9;

/// Computed times for one task. Nothing here is rounded.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskTiming {
    pub id: TaskId,
    pub duration: f64,
    pub dependencies: Vec<TaskId>,
    pub earliest_start: f64,
    pub earliest_finish: f64,
    pub latest_start: f64,
    pub latest_finish: f64,
    pub slack: f64,
}

/// Result of scheduling a task list.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    /// Minimum project duration: the largest earliest-finish.
    pub project_duration: f64,
    /// All tasks, in the topological order the forward pass produced.
    pub tasks: Vec<TaskTiming>,
    /// Zero-slack tasks in topological order.
    pub critical_path: Vec<TaskId>,
    pub slack_epsilon: f64,
}

impl Schedule {
    pub fn timing(&self, id: &str) -> Option<&TaskTiming> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn is_critical(&self, id: &str) -> bool {
        self.timing(id)
            .is_some_and(|t| t.slack.abs() <= self.slack_epsilon)
    }

    /// Slack per task id.
    pub fn slack_map(&self) -> BTreeMap<TaskId, f64> {
        self.tasks.iter().map(|t| (t.id.clone(), t.slack)).collect()
    }

    pub fn topological_order(&self) -> impl Iterator<Item = &str> {
        self.tasks.iter().map(|t| t.id.as_str())
    }
}

/// Forward/backward pass scheduler.
#[derive(Debug, Clone, Copy)]
pub struct Scheduler {
    slack_epsilon: f64,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self {
            slack_epsilon: DEFAULT_SLACK_EPSILON,
        }
    }
}

/// Schedule `tasks` with the default zero-slack tolerance.
pub fn compute_schedule(tasks: &TaskList) -> Result<Schedule> {
    Scheduler::default().schedule(tasks)
}

impl Scheduler {
    pub fn new(slack_epsilon: f64) -> Self {
        Self { slack_epsilon }
    }

    /// Compute earliest/latest times, slack and the critical path.
    ///
    /// Fails with [`DepdagError::Cycle`] before computing anything if the
    /// dependency graph is cyclic.
    pub fn schedule(&self, tasks: &TaskList) -> Result<Schedule> {
        let specs = tasks.tasks();
        let (order, earliest) = forward_pass(tasks)?;

        let project_duration = earliest
            .values()
            .map(|&(_, ef)| ef)
            .fold(0.0_f64, f64::max);

        let latest = backward_pass(specs, &order, project_duration);

        let timings: Vec<TaskTiming> = order
            .iter()
            .map(|&i| {
                let spec = &specs[i];
                let (es, ef) = earliest[spec.id.as_str()];
                let (ls, lf) = latest[spec.id.as_str()];
                TaskTiming {
                    id: spec.id.clone(),
                    duration: spec.duration,
                    dependencies: spec.dependencies.clone(),
                    earliest_start: es,
                    earliest_finish: ef,
                    latest_start: ls,
                    latest_finish: lf,
                    slack: ls - es,
                }
            })
            .collect();

        let critical_path: Vec<TaskId> = timings
            .iter()
            .filter(|t| t.slack.abs() <= self.slack_epsilon)
            .map(|t| t.id.clone())
            .collect();

        info!(
            tasks = timings.len(),
            project_duration,
            critical = %critical_path.join(","),
            "schedule computed"
        );

        Ok(Schedule {
            project_duration,
            tasks: timings,
            critical_path,
            slack_epsilon: self.slack_epsilon,
        })
    }
}

/// Topological order (as indices into the task list) plus `(ES, EF)` per id.
type ForwardPass<'a> = (Vec<usize>, HashMap<&'a str, (f64, f64)>);

/// Each pass scans the remaining tasks in document order and schedules every
/// task whose dependencies are all scheduled, including ones scheduled
/// earlier in the same pass. A pass that schedules nothing proves a cycle.
fn forward_pass(tasks: &TaskList) -> Result<ForwardPass<'_>> {
    let specs = tasks.tasks();
    let mut earliest: HashMap<&str, (f64, f64)> = HashMap::with_capacity(specs.len());
    let mut order: Vec<usize> = Vec::with_capacity(specs.len());
    let mut remaining: Vec<usize> = (0..specs.len()).collect();
    let mut pass = 0usize;

    while !remaining.is_empty() {
        pass += 1;
        let before = remaining.len();

        remaining.retain(|&i| {
            let spec = &specs[i];
            let mut es = 0.0_f64;
            for dep in spec.dependencies.iter() {
                match earliest.get(dep.as_str()) {
                    Some(&(_, dep_ef)) => es = es.max(dep_ef),
                    None => return true,
                }
            }
            earliest.insert(spec.id.as_str(), (es, es + spec.duration));
            order.push(i);
            false
        });

        debug!(pass, scheduled = before - remaining.len(), left = remaining.len(), "forward pass");

        if remaining.len() == before {
            return Err(cycle_error(tasks, &remaining));
        }
    }

    Ok((order, earliest))
}

/// `(LS, LF)` per id, walking `order` backwards.
fn backward_pass<'a>(
    specs: &'a [TaskSpec],
    order: &[usize],
    project_duration: f64,
) -> HashMap<&'a str, (f64, f64)> {
    let mut dependents: HashMap<&str, Vec<&str>> = HashMap::new();
    for spec in specs {
        for dep in spec.dependencies.iter() {
            dependents
                .entry(dep.as_str())
                .or_default()
                .push(spec.id.as_str());
        }
    }

    let mut latest: HashMap<&str, (f64, f64)> = HashMap::with_capacity(specs.len());

    for &i in order.iter().rev() {
        let spec = &specs[i];
        let lf = match dependents.get(spec.id.as_str()) {
            Some(succs) if !succs.is_empty() => succs
                .iter()
                .filter_map(|s| latest.get(s).map(|&(ls, _)| ls))
                .fold(f64::INFINITY, f64::min),
            _ => project_duration,
        };
        latest.insert(spec.id.as_str(), (lf - spec.duration, lf));
    }

    latest
}

/// Name the tasks that could not be scheduled and one cycle among them.
///
/// Every unschedulable task waits on another unschedulable task, so the
/// subgraph restricted to them always contains a cycle.
fn cycle_error(tasks: &TaskList, stuck: &[usize]) -> DepdagError {
    let specs = tasks.tasks();
    let stuck_ids: Vec<TaskId> = stuck.iter().map(|&i| specs[i].id.clone()).collect();
    let keep: BTreeSet<&str> = stuck_ids.iter().map(|s| s.as_str()).collect();

    let sub = tasks.dependency_map().restricted_to(&keep);
    let graph = DependencyGraph::from_map(&sub);
    let cycle = detect_cycles(&graph)
        .into_iter()
        .next()
        .unwrap_or_else(|| stuck_ids.clone());

    warn!(cycle = %cycle.join(" -> "), "task list is not schedulable");

    DepdagError::Cycle {
        tasks: stuck_ids,
        cycle,
    }
}
