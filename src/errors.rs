// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

use crate::types::{ModuleId, TaskId};

#[derive(Error, Debug)]
pub enum DepdagError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// Raised only where an acyclic graph is required (scheduling).
    #[error("Cycle detected: {} (unschedulable tasks: {})", .cycle.join(" -> "), .tasks.join(", "))]
    Cycle {
        /// Every task the forward pass could not schedule.
        tasks: Vec<TaskId>,
        /// One concrete closed walk among `tasks`.
        cycle: Vec<ModuleId>,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, DepdagError>;
