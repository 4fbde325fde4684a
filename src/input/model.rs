// src/input/model.rs

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

use crate::errors::{DepdagError, Result};
use crate::types::{ModuleId, TaskId};

/// Dependency map exactly as it appears in the JSON document.
///
/// ```json
/// { "api": ["core", "db"], "db": ["core"], "core": [] }
/// ```
///
/// A module key may appear only once; a repeated key is a parse error
/// instead of letting one entry silently replace the other.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct RawDependencyMap(pub BTreeMap<ModuleId, Vec<ModuleId>>);

impl<'de> Deserialize<'de> for RawDependencyMap {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RawDependencyMapVisitor)
    }
}

struct RawDependencyMapVisitor;

impl<'de> Visitor<'de> for RawDependencyMapVisitor {
    type Value = RawDependencyMap;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object mapping module ids to lists of dependency ids")
    }

    fn visit_map<M>(self, mut map: M) -> std::result::Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut modules = BTreeMap::new();

        while let Some(module) = map.next_key::<ModuleId>()? {
            if modules.contains_key(&module) {
                return Err(de::Error::custom(format!(
                    "duplicate module '{module}'"
                )));
            }
            let deps: Vec<ModuleId> = map.next_value()?;
            modules.insert(module, deps);
        }

        Ok(RawDependencyMap(modules))
    }
}

/// Validated dependency map: every edge points at a known module.
///
/// Modules and their dependency sets are kept sorted, which makes every
/// traversal over this map deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyMap {
    modules: BTreeMap<ModuleId, BTreeSet<ModuleId>>,
}

impl DependencyMap {
    pub(crate) fn new_unchecked(modules: BTreeMap<ModuleId, BTreeSet<ModuleId>>) -> Self {
        Self { modules }
    }

    /// All module ids in ascending order.
    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(|s| s.as_str())
    }

    /// Direct dependencies of `module`, ascending. Empty for unknown ids.
    pub fn dependencies_of(&self, module: &str) -> impl Iterator<Item = &str> {
        self.modules
            .get(module)
            .into_iter()
            .flat_map(|deps| deps.iter().map(|s| s.as_str()))
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Iterate `(module, dependencies)` pairs in ascending module order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<ModuleId>)> {
        self.modules.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Restrict the map to `keep`, dropping edges that leave the subset.
    pub fn restricted_to(&self, keep: &BTreeSet<&str>) -> DependencyMap {
        let modules = self
            .modules
            .iter()
            .filter(|(id, _)| keep.contains(id.as_str()))
            .map(|(id, deps)| {
                let deps = deps
                    .iter()
                    .filter(|d| keep.contains(d.as_str()))
                    .cloned()
                    .collect();
                (id.clone(), deps)
            })
            .collect();
        DependencyMap { modules }
    }
}

/// One task exactly as it appears in the JSON document.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawTask {
    pub id: TaskId,
    pub duration: f64,
    #[serde(default)]
    pub dependencies: Vec<TaskId>,
}

/// Task list exactly as it appears in the JSON document.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct RawTaskList(pub Vec<RawTask>);

/// A validated task: finite non-negative duration, known dependencies.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskSpec {
    pub id: TaskId,
    pub duration: f64,
    /// Prerequisites in first-seen order, without repeats.
    pub dependencies: Vec<TaskId>,
}

/// Validated task list. Preserves document order, which drives the scan
/// order of the scheduler's forward pass.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskList {
    tasks: Vec<TaskSpec>,
}

impl TaskList {
    pub(crate) fn new_unchecked(tasks: Vec<TaskSpec>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[TaskSpec] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&TaskSpec> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// The dependency structure of this task list as a module map.
    pub fn dependency_map(&self) -> DependencyMap {
        let modules = self
            .tasks
            .iter()
            .map(|t| (t.id.clone(), t.dependencies.iter().cloned().collect()))
            .collect();
        DependencyMap::new_unchecked(modules)
    }

    /// Copy of this list with one task's duration replaced.
    ///
    /// Fails if `id` is unknown or `duration` is not a valid duration.
    pub fn with_duration(&self, id: &str, duration: f64) -> Result<TaskList> {
        if self.get(id).is_none() {
            return Err(DepdagError::Validation(format!("unknown task '{id}'")));
        }

        let raw = RawTaskList(
            self.tasks
                .iter()
                .map(|t| RawTask {
                    id: t.id.clone(),
                    duration: if t.id == id { duration } else { t.duration },
                    dependencies: t.dependencies.clone(),
                })
                .collect(),
        );

        TaskList::try_from(raw)
    }
}
