#![allow(dead_code)]

use std::collections::BTreeMap;

use depdag::input::{DependencyMap, RawDependencyMap, RawTask, RawTaskList, TaskList};

/// Builder for `TaskList` to simplify test setup.
pub struct TaskListBuilder {
    tasks: Vec<RawTask>,
}

impl TaskListBuilder {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    pub fn task(mut self, id: &str, duration: f64, deps: &[&str]) -> Self {
        self.tasks.push(RawTask {
            id: id.to_string(),
            duration,
            dependencies: deps.iter().map(|d| d.to_string()).collect(),
        });
        self
    }

    /// The unvalidated list, for tests that expect validation to fail.
    pub fn build_raw(self) -> RawTaskList {
        RawTaskList(self.tasks)
    }

    pub fn build(self) -> TaskList {
        TaskList::try_from(self.build_raw()).expect("Failed to build valid task list from builder")
    }
}

impl Default for TaskListBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `DependencyMap`.
pub struct DependencyMapBuilder {
    modules: BTreeMap<String, Vec<String>>,
}

impl DependencyMapBuilder {
    pub fn new() -> Self {
        Self {
            modules: BTreeMap::new(),
        }
    }

    /// Add `module` with the given dependencies (replacing any earlier entry).
    pub fn module(mut self, module: &str, deps: &[&str]) -> Self {
        self.modules.insert(
            module.to_string(),
            deps.iter().map(|d| d.to_string()).collect(),
        );
        self
    }

    /// Add `a -> b` and make sure both modules exist.
    pub fn edge(mut self, from: &str, to: &str) -> Self {
        self.modules.entry(to.to_string()).or_default();
        self.modules
            .entry(from.to_string())
            .or_default()
            .push(to.to_string());
        self
    }

    pub fn build_raw(self) -> RawDependencyMap {
        RawDependencyMap(self.modules)
    }

    pub fn build(self) -> DependencyMap {
        DependencyMap::try_from(self.build_raw())
            .expect("Failed to build valid dependency map from builder")
    }
}

impl Default for DependencyMapBuilder {
    fn default() -> Self {
        Self::new()
    }
}
