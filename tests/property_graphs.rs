use std::collections::HashSet;

use proptest::prelude::*;
use depdag::dag::{DependencyGraph, detect_cycles};
use depdag::input::{DependencyMap, TaskList};
use depdag::schedule::compute_schedule;
use depdag_test_utils::builders::{DependencyMapBuilder, TaskListBuilder};

// Raw dependency index lists, one per node. Sanitising them against the node
// index is left to the individual strategies.
fn raw_deps(max_nodes: usize) -> impl Strategy<Value = Vec<Vec<usize>>> {
    (1..=max_nodes).prop_flat_map(|n| {
        proptest::collection::vec(proptest::collection::vec(any::<usize>(), 0..n), n)
    })
}

// Acyclic by construction: node i may only depend on nodes 0..i.
fn acyclic_map_strategy(max_nodes: usize) -> impl Strategy<Value = DependencyMap> {
    raw_deps(max_nodes).prop_map(|raw| {
        let mut builder = DependencyMapBuilder::new();
        for (i, potential) in raw.into_iter().enumerate() {
            let deps: HashSet<String> = potential
                .into_iter()
                .filter(|_| i > 0)
                .map(|d| format!("m{}", d % i.max(1)))
                .collect();
            let deps: Vec<&str> = deps.iter().map(|s| s.as_str()).collect();
            builder = builder.module(&format!("m{i}"), &deps);
        }
        builder.build()
    })
}

// Arbitrary (possibly cyclic) graph: any node may depend on any node.
fn any_map_strategy(max_nodes: usize) -> impl Strategy<Value = DependencyMap> {
    raw_deps(max_nodes).prop_map(|raw| {
        let n = raw.len();
        let mut builder = DependencyMapBuilder::new();
        for (i, potential) in raw.into_iter().enumerate() {
            let deps: Vec<String> = potential.into_iter().map(|d| format!("m{}", d % n)).collect();
            let deps: Vec<&str> = deps.iter().map(|s| s.as_str()).collect();
            builder = builder.module(&format!("m{i}"), &deps);
        }
        builder.build()
    })
}

fn task_list_strategy(max_tasks: usize) -> impl Strategy<Value = TaskList> {
    (raw_deps(max_tasks), proptest::collection::vec(0u32..20, max_tasks)).prop_map(
        |(raw, durations)| {
            let mut builder = TaskListBuilder::new();
            for (i, potential) in raw.into_iter().enumerate() {
                let deps: HashSet<String> = potential
                    .into_iter()
                    .filter(|_| i > 0)
                    .map(|d| format!("t{}", d % i.max(1)))
                    .collect();
                let deps: Vec<&str> = deps.iter().map(|s| s.as_str()).collect();
                builder = builder.task(&format!("t{i}"), durations[i] as f64, &deps);
            }
            builder.build()
        },
    )
}

proptest! {
    #[test]
    fn acyclic_graphs_have_no_cycles(map in acyclic_map_strategy(12)) {
        let graph = DependencyGraph::from_map(&map);
        prop_assert!(detect_cycles(&graph).is_empty());
    }

    #[test]
    fn reported_cycles_are_closed_walks(map in any_map_strategy(10)) {
        let graph = DependencyGraph::from_map(&map);
        let cycles = detect_cycles(&graph);

        prop_assert_eq!(cycles.is_empty(), graph.is_acyclic());
        for cycle in cycles.iter() {
            prop_assert!(cycle.len() >= 2);
            prop_assert_eq!(cycle.first(), cycle.last());
            for pair in cycle.windows(2) {
                prop_assert!(map.dependencies_of(&pair[0]).any(|d| d == pair[1]));
            }
        }
        prop_assert_eq!(&cycles, &detect_cycles(&graph));
    }

    #[test]
    fn schedule_invariants_hold(tasks in task_list_strategy(10)) {
        let s = compute_schedule(&tasks).unwrap();

        prop_assert!(!s.critical_path.is_empty());
        for t in s.tasks.iter() {
            prop_assert!(t.slack >= -1e-9);
            prop_assert!(t.latest_finish <= s.project_duration + 1e-9);
            prop_assert_eq!(t.earliest_finish, t.earliest_start + t.duration);
            for dep in t.dependencies.iter() {
                let d = s.timing(dep).unwrap();
                prop_assert!(d.earliest_finish <= t.earliest_start);
            }
        }
        prop_assert_eq!(&s, &compute_schedule(&tasks).unwrap());
    }

    #[test]
    fn delay_beyond_slack_extends_project_by_overage(
        tasks in task_list_strategy(8),
        pick in any::<usize>(),
        extra in 1u32..10,
    ) {
        let s = compute_schedule(&tasks).unwrap();
        let target = &s.tasks[pick % s.tasks.len()];

        let within = tasks.with_duration(&target.id, target.duration + target.slack).unwrap();
        prop_assert_eq!(compute_schedule(&within).unwrap().project_duration, s.project_duration);

        let beyond = tasks
            .with_duration(&target.id, target.duration + target.slack + extra as f64)
            .unwrap();
        prop_assert_eq!(
            compute_schedule(&beyond).unwrap().project_duration,
            s.project_duration + extra as f64
        );
    }
}
