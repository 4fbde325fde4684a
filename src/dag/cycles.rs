// src/dag/cycles.rs

//! Dependency-cycle detection.
//!
//! A depth-first walk keeps two pieces of bookkeeping:
//! - `visited`: modules whose subgraph has been entered at least once; they
//!   are never re-explored.
//! - `on_stack`: modules on the active path; reaching one of these again is a
//!   back-edge and closes a cycle.
//!
//! A reported cycle is the active path from the first occurrence of the
//! revisited module up to the current module, followed by the revisited
//! module again. A self-loop therefore reads `[a, a]`.
//!
//! The walk uses an explicit frame stack rather than recursion. Roots and
//! neighbours come out of [`DependencyGraph`] in ascending order, so the
//! reported cycles and their order are identical across runs.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::dag::graph::DependencyGraph;
use crate::types::ModuleId;

/// Closed walk along dependency edges; first and last entries are equal.
pub type Cycle = Vec<ModuleId>;

struct Frame<'a> {
    module: &'a str,
    deps: Vec<&'a str>,
    next: usize,
}

impl<'a> Frame<'a> {
    fn enter(graph: &DependencyGraph<'a>, module: &'a str) -> Self {
        Self {
            module,
            deps: graph.dependencies_of(module),
            next: 0,
        }
    }

    fn next_dep(&mut self) -> Option<&'a str> {
        let dep = self.deps.get(self.next).copied();
        self.next += 1;
        dep
    }
}

/// Report every cycle reachable by the depth-first walk over `graph`.
///
/// Returns an empty list for acyclic graphs. Finding cycles is the normal
/// output here, never an error.
pub fn detect_cycles(graph: &DependencyGraph<'_>) -> Vec<Cycle> {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut on_stack: HashSet<&str> = HashSet::new();
    let mut stack: Vec<Frame<'_>> = Vec::new();
    let mut cycles: Vec<Cycle> = Vec::new();

    for root in graph.modules() {
        if visited.contains(root) {
            continue;
        }

        trace!(root, "starting depth-first walk");
        visited.insert(root);
        on_stack.insert(root);
        stack.push(Frame::enter(graph, root));

        loop {
            let Some(frame) = stack.last_mut() else {
                break;
            };

            match frame.next_dep() {
                Some(dep) if !visited.contains(dep) => {
                    visited.insert(dep);
                    on_stack.insert(dep);
                    stack.push(Frame::enter(graph, dep));
                }
                Some(dep) if on_stack.contains(dep) => {
                    if let Some(start) = stack.iter().position(|f| f.module == dep) {
                        let mut cycle: Cycle =
                            stack[start..].iter().map(|f| f.module.to_string()).collect();
                        cycle.push(dep.to_string());
                        debug!(cycle = %cycle.join(" -> "), "cycle found");
                        cycles.push(cycle);
                    }
                }
                Some(_) => {
                    // Finished subgraph reached through a forward or cross edge.
                }
                None => {
                    if let Some(done) = stack.pop() {
                        on_stack.remove(done.module);
                    }
                }
            }
        }
    }

    cycles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::dependency_map_from_str;

    fn cycles_of(json: &str) -> Vec<Cycle> {
        let map = dependency_map_from_str(json).unwrap();
        let graph = DependencyGraph::from_map(&map);
        detect_cycles(&graph)
    }

    #[test]
    fn acyclic_graph_has_no_cycles() {
        let cycles = cycles_of(r#"{"a": ["b", "c"], "b": ["c"], "c": []}"#);
        assert!(cycles.is_empty());
    }

    #[test]
    fn empty_graph_has_no_cycles() {
        assert!(cycles_of("{}").is_empty());
    }

    #[test]
    fn simple_triangle_is_reported_once_in_adjacency_order() {
        let cycles = cycles_of(r#"{"A": ["B"], "B": ["C"], "C": ["A"]}"#);
        assert_eq!(cycles, vec![vec!["A", "B", "C", "A"]]);
    }

    #[test]
    fn self_loop_is_a_one_node_cycle() {
        let cycles = cycles_of(r#"{"A": ["A"]}"#);
        assert_eq!(cycles, vec![vec!["A", "A"]]);
    }

    #[test]
    fn disconnected_components_are_each_walked() {
        let cycles = cycles_of(
            r#"{"a": ["b"], "b": ["a"], "x": ["y"], "y": ["z"], "z": ["x"], "lone": []}"#,
        );
        assert_eq!(
            cycles,
            vec![vec!["a", "b", "a"], vec!["x", "y", "z", "x"]]
        );
    }

    #[test]
    fn cycle_entered_from_outside_starts_at_revisited_module() {
        // entry -> p -> q -> p
        let cycles = cycles_of(r#"{"entry": ["p"], "p": ["q"], "q": ["p"]}"#);
        assert_eq!(cycles, vec![vec!["p", "q", "p"]]);
    }

    #[test]
    fn two_back_edges_from_one_path_give_two_cycles() {
        // a -> b -> c, with c -> a and c -> b
        let cycles = cycles_of(r#"{"a": ["b"], "b": ["c"], "c": ["a", "b"]}"#);
        assert_eq!(
            cycles,
            vec![vec!["a", "b", "c", "a"], vec!["b", "c", "b"]]
        );
    }

    #[test]
    fn deep_chain_does_not_overflow() {
        let n = 50_000;
        let mut json = String::from("{");
        for i in 0..n {
            if i > 0 {
                json.push(',');
            }
            if i + 1 < n {
                json.push_str(&format!("\"m{i}\": [\"m{}\"]", i + 1));
            } else {
                json.push_str(&format!("\"m{i}\": [\"m0\"]"));
            }
        }
        json.push('}');

        let cycles = cycles_of(&json);
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].len(), n + 1);
        assert_eq!(cycles[0].first(), cycles[0].last());
    }

    #[test]
    fn repeated_runs_are_identical() {
        let json = r#"{"a": ["b", "c"], "b": ["a"], "c": ["c", "a"]}"#;
        assert_eq!(cycles_of(json), cycles_of(json));
    }
}
