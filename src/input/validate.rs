// src/input/validate.rs

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::errors::{DepdagError, Result};
use crate::input::model::{DependencyMap, RawDependencyMap, RawTaskList, TaskList, TaskSpec};

impl TryFrom<RawDependencyMap> for DependencyMap {
    type Error = DepdagError;

    fn try_from(raw: RawDependencyMap) -> std::result::Result<Self, Self::Error> {
        validate_module_references(&raw)?;

        let modules: BTreeMap<_, BTreeSet<_>> = raw
            .0
            .into_iter()
            .map(|(id, deps)| (id, deps.into_iter().collect()))
            .collect();

        Ok(DependencyMap::new_unchecked(modules))
    }
}

/// Dangling edges would hide real cycles, so they are a hard error.
fn validate_module_references(raw: &RawDependencyMap) -> Result<()> {
    for (module, deps) in raw.0.iter() {
        for dep in deps {
            if !raw.0.contains_key(dep) {
                return Err(DepdagError::Validation(format!(
                    "module '{module}' depends on unknown module '{dep}'"
                )));
            }
        }
    }
    Ok(())
}

impl TryFrom<RawTaskList> for TaskList {
    type Error = DepdagError;

    fn try_from(raw: RawTaskList) -> std::result::Result<Self, Self::Error> {
        ensure_has_tasks(&raw)?;
        validate_unique_ids(&raw)?;
        validate_durations(&raw)?;
        validate_task_dependencies(&raw)?;

        let tasks = raw
            .0
            .into_iter()
            .map(|t| {
                let mut seen = HashSet::new();
                let dependencies = t
                    .dependencies
                    .into_iter()
                    .filter(|d| seen.insert(d.clone()))
                    .collect();
                TaskSpec {
                    id: t.id,
                    duration: t.duration,
                    dependencies,
                }
            })
            .collect();

        Ok(TaskList::new_unchecked(tasks))
    }
}

fn ensure_has_tasks(raw: &RawTaskList) -> Result<()> {
    if raw.0.is_empty() {
        return Err(DepdagError::Validation(
            "task list must contain at least one task".to_string(),
        ));
    }
    Ok(())
}

fn validate_unique_ids(raw: &RawTaskList) -> Result<()> {
    let mut seen = HashSet::new();
    for task in raw.0.iter() {
        if !seen.insert(task.id.as_str()) {
            return Err(DepdagError::Validation(format!(
                "duplicate task id '{}'",
                task.id
            )));
        }
    }
    Ok(())
}

fn validate_durations(raw: &RawTaskList) -> Result<()> {
    for task in raw.0.iter() {
        if !task.duration.is_finite() {
            return Err(DepdagError::Validation(format!(
                "task '{}' has a non-finite duration",
                task.id
            )));
        }
        if task.duration < 0.0 {
            return Err(DepdagError::Validation(format!(
                "task '{}' has negative duration {}",
                task.id, task.duration
            )));
        }
    }
    Ok(())
}

fn validate_task_dependencies(raw: &RawTaskList) -> Result<()> {
    let ids: HashSet<&str> = raw.0.iter().map(|t| t.id.as_str()).collect();

    for task in raw.0.iter() {
        for dep in task.dependencies.iter() {
            if !ids.contains(dep.as_str()) {
                return Err(DepdagError::Validation(format!(
                    "task '{}' has unknown dependency '{}'",
                    task.id, dep
                )));
            }
        }
    }
    Ok(())
}
