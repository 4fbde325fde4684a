// src/dag/graph.rs

use std::collections::HashSet;

use petgraph::Direction;
use petgraph::algo::{is_cyclic_directed, tarjan_scc};
use petgraph::graphmap::DiGraphMap;

use crate::input::DependencyMap;

/// Borrowed graph view over a [`DependencyMap`].
///
/// Edge direction: module -> dependency. For
///
/// ```json
/// { "api": ["core"] }
/// ```
///
/// we add edge `api -> core`.
///
/// Nodes and edges are inserted in ascending id order, so neighbour
/// iteration is sorted and every traversal is reproducible.
#[derive(Debug, Clone)]
pub struct DependencyGraph<'a> {
    graph: DiGraphMap<&'a str, ()>,
    ids: HashSet<&'a str>,
}

impl<'a> DependencyGraph<'a> {
    pub fn from_map(map: &'a DependencyMap) -> Self {
        let mut graph: DiGraphMap<&'a str, ()> = DiGraphMap::new();
        let mut ids = HashSet::with_capacity(map.len());

        for module in map.modules() {
            graph.add_node(module);
            ids.insert(module);
        }

        for (module, deps) in map.iter() {
            for dep in deps {
                graph.add_edge(module, dep.as_str(), ());
            }
        }

        Self { graph, ids }
    }

    /// All module ids, ascending.
    pub fn modules(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.graph.nodes()
    }

    pub fn module_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Modules `module` depends on, ascending.
    pub fn dependencies_of(&self, module: &str) -> Vec<&'a str> {
        self.neighbours(module, Direction::Outgoing)
    }

    /// Modules that depend on `module`, ascending.
    pub fn dependents_of(&self, module: &str) -> Vec<&'a str> {
        self.neighbours(module, Direction::Incoming)
    }

    /// The stored key equal to `module`, carrying the graph's lifetime.
    fn key(&self, module: &str) -> Option<&'a str> {
        self.ids.get(module).copied()
    }

    fn neighbours(&self, module: &str, dir: Direction) -> Vec<&'a str> {
        let Some(node) = self.key(module) else {
            return Vec::new();
        };
        let mut out: Vec<&'a str> = self.graph.neighbors_directed(node, dir).collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    pub fn has_self_loop(&self, module: &str) -> bool {
        self.key(module)
            .is_some_and(|node| self.graph.contains_edge(node, node))
    }

    pub fn is_acyclic(&self) -> bool {
        !is_cyclic_directed(&self.graph)
    }

    /// Strongly connected components that contain a cycle: two or more
    /// modules, or a single module depending on itself.
    ///
    /// Each component is sorted; components are ordered by their first id.
    pub fn entangled_components(&self) -> Vec<Vec<&'a str>> {
        let mut components: Vec<Vec<&'a str>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|scc| scc.len() > 1 || scc.first().is_some_and(|m| self.has_self_loop(m)))
            .map(|mut scc| {
                scc.sort_unstable();
                scc
            })
            .collect();
        components.sort();
        components
    }
}
