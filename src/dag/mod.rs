// src/dag/mod.rs

//! Dependency graph analysis.
//!
//! - [`graph`] wraps a validated [`DependencyMap`] in a petgraph view.
//! - [`cycles`] reports every dependency cycle with a depth-first walk.
//! - [`coupling`] derives fan-in/fan-out metrics and entangled components.

pub mod coupling;
pub mod cycles;
pub mod graph;

pub use coupling::{CouplingReport, ModuleCoupling, analyze_coupling};
pub use cycles::{Cycle, detect_cycles};
pub use graph::DependencyGraph;

use tracing::info;

use crate::input::DependencyMap;

/// Everything the `cycles` subcommand reports about one dependency map.
#[derive(Debug, Clone, PartialEq)]
pub struct DependencyAnalysis {
    pub cycles: Vec<Cycle>,
    pub coupling: CouplingReport,
}

/// Run cycle detection and coupling analysis over `map`.
pub fn analyze(map: &DependencyMap, coupling_threshold: f64) -> DependencyAnalysis {
    let graph = DependencyGraph::from_map(map);
    let cycles = detect_cycles(&graph);
    let coupling = analyze_coupling(&graph, coupling_threshold);

    info!(
        modules = map.len(),
        cycles = cycles.len(),
        avg_coupling = coupling.average,
        "dependency analysis complete"
    );

    DependencyAnalysis { cycles, coupling }
}
