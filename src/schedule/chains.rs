// src/schedule/chains.rs

//! Present the critical tasks as paths.
//!
//! Two critical tasks are linked when the second depends on the first and
//! starts exactly when the first finishes. A chain starts at a critical task
//! that no such link leads into and follows links until none remain.
//! Parallel critical paths produce several chains.

use std::collections::HashMap;

use tracing::warn;

use crate::schedule::critical_path::Schedule;
use crate::types::TaskId;

/// Upper bound on enumerated chains; dense zero-slack lattices can otherwise
/// produce exponentially many.
pub const MAX_CHAINS: usize = 64;

pub fn critical_chains(schedule: &Schedule) -> Vec<Vec<TaskId>> {
    let eps = schedule.slack_epsilon;
    let tasks = &schedule.tasks;

    let index: HashMap<&str, usize> = tasks
        .iter()
        .enumerate()
        .map(|(i, t)| (t.id.as_str(), i))
        .collect();

    let critical: Vec<bool> = tasks.iter().map(|t| t.slack.abs() <= eps).collect();

    // Tight links between critical tasks, as topological indices.
    let mut links: Vec<Vec<usize>> = vec![Vec::new(); tasks.len()];
    let mut has_incoming = vec![false; tasks.len()];
    for (i, task) in tasks.iter().enumerate() {
        if !critical[i] {
            continue;
        }
        for dep in task.dependencies.iter() {
            let Some(&d) = index.get(dep.as_str()) else {
                continue;
            };
            if critical[d] && (tasks[d].earliest_finish - task.earliest_start).abs() <= eps {
                links[d].push(i);
                has_incoming[i] = true;
            }
        }
    }
    for succs in links.iter_mut() {
        succs.sort_unstable();
    }

    let mut chains: Vec<Vec<TaskId>> = Vec::new();

    for start in (0..tasks.len()).filter(|&i| critical[i] && !has_incoming[i]) {
        let mut stack: Vec<Vec<usize>> = vec![vec![start]];

        while let Some(path) = stack.pop() {
            let Some(&last) = path.last() else {
                continue;
            };

            if links[last].is_empty() {
                chains.push(path.iter().map(|&i| tasks[i].id.clone()).collect());
                if chains.len() >= MAX_CHAINS {
                    warn!(limit = MAX_CHAINS, "critical chain listing truncated");
                    return chains;
                }
                continue;
            }

            for &next in links[last].iter().rev() {
                let mut extended = path.clone();
                extended.push(next);
                stack.push(extended);
            }
        }
    }

    chains
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::task_list_from_str;
    use crate::schedule::compute_schedule;

    fn chains_of(json: &str) -> Vec<Vec<TaskId>> {
        let tasks = task_list_from_str(json).unwrap();
        critical_chains(&compute_schedule(&tasks).unwrap())
    }

    #[test]
    fn demo_network_has_a_single_chain() {
        let chains = chains_of(
            r#"[{"id": "A", "duration": 3},
                {"id": "B", "duration": 4, "dependencies": ["A"]},
                {"id": "C", "duration": 2, "dependencies": ["A"]},
                {"id": "D", "duration": 5, "dependencies": ["B", "C"]}]"#,
        );
        assert_eq!(chains, vec![vec!["A", "B", "D"]]);
    }

    #[test]
    fn equal_branches_give_two_chains() {
        let chains = chains_of(
            r#"[{"id": "s", "duration": 1},
                {"id": "l", "duration": 2, "dependencies": ["s"]},
                {"id": "r", "duration": 2, "dependencies": ["s"]},
                {"id": "e", "duration": 1, "dependencies": ["l", "r"]}]"#,
        );
        assert_eq!(chains, vec![vec!["s", "l", "e"], vec!["s", "r", "e"]]);
    }

    #[test]
    fn independent_critical_tasks_are_separate_chains() {
        let chains = chains_of(r#"[{"id": "a", "duration": 2}, {"id": "b", "duration": 2}]"#);
        assert_eq!(chains, vec![vec!["a"], vec!["b"]]);
    }

    #[test]
    fn zero_duration_start_is_not_split_off() {
        let chains = chains_of(
            r#"[{"id": "kickoff", "duration": 0},
                {"id": "work", "duration": 3, "dependencies": ["kickoff"]}]"#,
        );
        assert_eq!(chains, vec![vec!["kickoff", "work"]]);
    }
}
