// src/input/loader.rs

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::errors::Result;
use crate::input::model::{DependencyMap, RawDependencyMap, RawTaskList, TaskList};

/// Read and validate a dependency map document.
pub fn load_dependency_map(path: impl AsRef<Path>) -> Result<DependencyMap> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let map = dependency_map_from_str(&contents)?;
    debug!(path = %path.display(), modules = map.len(), "loaded dependency map");
    Ok(map)
}

/// Parse and validate a dependency map from JSON text.
pub fn dependency_map_from_str(json: &str) -> Result<DependencyMap> {
    let raw: RawDependencyMap = serde_json::from_str(json)?;
    DependencyMap::try_from(raw)
}

/// Read and validate a task list document.
pub fn load_task_list(path: impl AsRef<Path>) -> Result<TaskList> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let tasks = task_list_from_str(&contents)?;
    debug!(path = %path.display(), tasks = tasks.len(), "loaded task list");
    Ok(tasks)
}

/// Parse and validate a task list from JSON text.
pub fn task_list_from_str(json: &str) -> Result<TaskList> {
    let raw: RawTaskList = serde_json::from_str(json)?;
    TaskList::try_from(raw)
}
