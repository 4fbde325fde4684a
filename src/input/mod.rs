// src/input/mod.rs

//! JSON input documents.
//!
//! Two shapes are accepted:
//! - a dependency map `{ "module": ["dep", ...], ... }` for cycle and
//!   coupling analysis;
//! - a task list `[{ "id": .., "duration": .., "dependencies": [..] }, ...]`
//!   for critical path scheduling.
//!
//! Both are deserialized into a raw form and then validated into a form the
//! algorithms can trust (no dangling references, sane durations).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{
    dependency_map_from_str, load_dependency_map, load_task_list, task_list_from_str,
};
pub use model::{DependencyMap, RawDependencyMap, RawTask, RawTaskList, TaskList, TaskSpec};
