// src/dag/coupling.rs

//! Module coupling metrics.
//!
//! coupling(m) = (fan-out + fan-in) / (N - 1), where N is the number of
//! modules; a graph with one module (or none) has coupling 0 everywhere.

use std::collections::BTreeMap;

use crate::dag::graph::DependencyGraph;
use crate::types::ModuleId;

/// Per-module view: direct edges in both directions plus the ratio.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleCoupling {
    pub dependencies: Vec<ModuleId>,
    pub dependents: Vec<ModuleId>,
    pub coupling: f64,
}

impl ModuleCoupling {
    pub fn is_isolated(&self) -> bool {
        self.dependencies.is_empty() && self.dependents.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CouplingReport {
    pub modules: BTreeMap<ModuleId, ModuleCoupling>,
    /// Mean coupling over all modules; 0 for an empty graph.
    pub average: f64,
    pub threshold: f64,
    /// Modules strictly above `threshold`, highest coupling first.
    pub high_coupling: Vec<ModuleId>,
    /// Modules with no edges at all, ascending.
    pub isolated: Vec<ModuleId>,
    /// Strongly connected components that contain a cycle.
    pub strongly_connected: Vec<Vec<ModuleId>>,
}

pub fn analyze_coupling(graph: &DependencyGraph<'_>, threshold: f64) -> CouplingReport {
    let n = graph.module_count();
    let denominator = if n > 1 { (n - 1) as f64 } else { 0.0 };

    let modules: BTreeMap<ModuleId, ModuleCoupling> = graph
        .modules()
        .map(|m| {
            let dependencies: Vec<ModuleId> =
                graph.dependencies_of(m).into_iter().map(String::from).collect();
            let dependents: Vec<ModuleId> =
                graph.dependents_of(m).into_iter().map(String::from).collect();
            let degree = (dependencies.len() + dependents.len()) as f64;
            let coupling = if denominator > 0.0 { degree / denominator } else { 0.0 };
            (
                m.to_string(),
                ModuleCoupling {
                    dependencies,
                    dependents,
                    coupling,
                },
            )
        })
        .collect();

    let average = if modules.is_empty() {
        0.0
    } else {
        modules.values().map(|m| m.coupling).sum::<f64>() / modules.len() as f64
    };

    let mut high_coupling: Vec<(&ModuleId, f64)> = modules
        .iter()
        .filter(|(_, info)| info.coupling > threshold)
        .map(|(id, info)| (id, info.coupling))
        .collect();
    high_coupling.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    let high_coupling = high_coupling.into_iter().map(|(id, _)| id.clone()).collect();

    let isolated = modules
        .iter()
        .filter(|(_, info)| info.is_isolated())
        .map(|(id, _)| id.clone())
        .collect();

    let strongly_connected = graph
        .entangled_components()
        .into_iter()
        .map(|scc| scc.into_iter().map(String::from).collect())
        .collect();

    CouplingReport {
        modules,
        average,
        threshold,
        high_coupling,
        isolated,
        strongly_connected,
    }
}
