//! Dependency pressure between tasks of one batch.
//!
//! Only direct edges are counted. A task gains pressure from the number of
//! other tasks that list it as a prerequisite, and loses half of it while it
//! still waits on prerequisites of its own. No transitive walk is done, so
//! cyclic graphs are scored like any other; [`DependencyGraph::find_cycle`]
//! exists only to report them.
//!
//! Ids that point outside the batch are treated as satisfied.

use std::collections::HashMap;

use crate::task::Task;

/// Multiplier applied to blocking pressure while a task has prerequisites
/// in the batch.
pub const READINESS_PENALTY: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    New,
    Active,
    Done,
}

/// Direct dependency edges of a task batch.
#[derive(Debug)]
pub struct DependencyGraph<'a> {
    tasks: &'a [Task],
    index: HashMap<&'a str, usize>,
    /// Outgoing edges: task -> prerequisites present in the batch.
    edges: Vec<Vec<usize>>,
    /// Incoming edge count: how many other tasks list this one.
    dependents: Vec<usize>,
}

impl<'a> DependencyGraph<'a> {
    pub fn build(tasks: &'a [Task]) -> Self {
        let mut index = HashMap::with_capacity(tasks.len());
        for (i, task) in tasks.iter().enumerate() {
            index.entry(task.id.as_str()).or_insert(i);
        }

        let mut edges = vec![Vec::new(); tasks.len()];
        let mut dependents = vec![0usize; tasks.len()];
        for (j, task) in tasks.iter().enumerate() {
            for dep in &task.dependencies {
                if let Some(&i) = index.get(dep.as_str()) {
                    if i != j && !edges[j].contains(&i) {
                        edges[j].push(i);
                        dependents[i] += 1;
                    }
                }
            }
        }

        Self {
            tasks,
            index,
            edges,
            dependents,
        }
    }

    /// Number of other tasks in the batch that depend on `id`.
    pub fn dependents(&self, id: &str) -> usize {
        self.index.get(id).map_or(0, |&i| self.dependents[i])
    }

    pub(crate) fn dependents_at(&self, i: usize) -> usize {
        self.dependents[i]
    }

    /// Whether `id` waits on at least one prerequisite present in the batch.
    pub fn is_blocked(&self, id: &str) -> bool {
        self.index.get(id).is_some_and(|&i| !self.edges[i].is_empty())
    }

    pub(crate) fn factor_at(&self, i: usize) -> f64 {
        combine(
            self.dependents[i],
            self.tasks.len().saturating_sub(1),
            !self.edges[i].is_empty(),
        )
    }

    /// Dependency factor in `[0, 1]` for `task` against this batch.
    ///
    /// `task` does not have to be a member of the batch; a foreign task is
    /// measured against every batch member.
    pub fn dependency_factor(&self, task: &Task) -> f64 {
        if let Some(&i) = self.index.get(task.id.as_str()) {
            return self.factor_at(i);
        }

        let incoming = self
            .tasks
            .iter()
            .filter(|other| other.depends_on(&task.id))
            .count();
        let blocked = task
            .dependencies
            .iter()
            .any(|d| *d != task.id && self.index.contains_key(d.as_str()));
        combine(incoming, self.tasks.len(), blocked)
    }

    /// `(task id, missing id)` pairs for prerequisites outside the batch.
    pub fn unknown_dependencies(&self) -> Vec<(String, String)> {
        let mut missing = Vec::new();
        for task in self.tasks {
            for dep in &task.dependencies {
                if !self.index.contains_key(dep.as_str()) {
                    missing.push((task.id.clone(), dep.clone()));
                }
            }
        }
        missing
    }

    /// Find one dependency cycle, returned as a closed path of ids
    /// (`["a", "b", "a"]`). Iterative, so deep chains cannot overflow.
    pub fn find_cycle(&self) -> Option<Vec<String>> {
        let mut state = vec![Visit::New; self.tasks.len()];

        for start in 0..self.tasks.len() {
            if state[start] != Visit::New {
                continue;
            }
            state[start] = Visit::Active;
            let mut stack: Vec<(usize, usize)> = vec![(start, 0)];

            while let Some(frame) = stack.last_mut() {
                let node = frame.0;
                let Some(&next) = self.edges[node].get(frame.1) else {
                    state[node] = Visit::Done;
                    stack.pop();
                    continue;
                };
                frame.1 += 1;

                match state[next] {
                    Visit::New => {
                        state[next] = Visit::Active;
                        stack.push((next, 0));
                    }
                    Visit::Active => {
                        let pos = stack.iter().position(|&(n, _)| n == next).unwrap_or(0);
                        let mut cycle: Vec<String> = stack[pos..]
                            .iter()
                            .map(|&(n, _)| self.tasks[n].id.clone())
                            .collect();
                        cycle.push(self.tasks[next].id.clone());
                        return Some(cycle);
                    }
                    Visit::Done => {}
                }
            }
        }
        None
    }
}

fn combine(incoming: usize, others: usize, blocked: bool) -> f64 {
    let pressure = incoming as f64 / others.max(1) as f64;
    let adjusted = if blocked {
        pressure * READINESS_PENALTY
    } else {
        pressure
    };
    adjusted.clamp(0.0, 1.0)
}

/// Dependency factor of `task` within `all_tasks`.
pub fn dependency_factor(task: &Task, all_tasks: &[Task]) -> f64 {
    DependencyGraph::build(all_tasks).dependency_factor(task)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, deps: &[&str]) -> Task {
        Task {
            id: id.into(),
            title: id.to_uppercase(),
            due_date: None,
            estimated_hours: 1.0,
            importance: 5.0,
            dependencies: deps.iter().map(|d| d.to_string()).collect(),
        }
    }

    #[test]
    fn depended_upon_task_gets_full_pressure() {
        let tasks = vec![task("t1", &[]), task("t2", &["t1"])];
        let graph = DependencyGraph::build(&tasks);

        assert_eq!(graph.dependency_factor(&tasks[0]), 1.0);
        assert_eq!(graph.dependency_factor(&tasks[1]), 0.0);
        assert_eq!(graph.dependents("t1"), 1);
        assert!(graph.is_blocked("t2"));
        assert!(!graph.is_blocked("t1"));
    }

    #[test]
    fn pressure_is_fraction_of_other_tasks() {
        let tasks = vec![
            task("a", &[]),
            task("b", &["a"]),
            task("c", &[]),
            task("d", &[]),
            task("e", &["a"]),
        ];
        assert_eq!(dependency_factor(&tasks[0], &tasks), 0.5);
        assert_eq!(dependency_factor(&tasks[2], &tasks), 0.0);
    }

    #[test]
    fn readiness_penalty_halves_but_never_zeroes() {
        let tasks = vec![
            task("base", &[]),
            task("mid", &["base"]),
            task("top", &["mid"]),
        ];
        let graph = DependencyGraph::build(&tasks);

        // mid: 1 dependent out of 2 others, halved because base is pending
        assert_eq!(graph.dependency_factor(&tasks[1]), 0.25);
        assert!(graph.dependency_factor(&tasks[1]) > 0.0);
    }

    #[test]
    fn unknown_ids_are_satisfied() {
        let tasks = vec![task("a", &["ghost"]), task("b", &["a"])];
        let graph = DependencyGraph::build(&tasks);

        assert!(!graph.is_blocked("a"));
        assert_eq!(graph.dependency_factor(&tasks[0]), 1.0);
        assert_eq!(
            graph.unknown_dependencies(),
            vec![("a".to_string(), "ghost".to_string())]
        );
    }

    #[test]
    fn cycles_terminate_and_are_reported() {
        let tasks = vec![task("a", &["b"]), task("b", &["c"]), task("c", &["a"])];
        let graph = DependencyGraph::build(&tasks);

        for t in &tasks {
            assert_eq!(graph.dependency_factor(t), 0.25);
        }
        assert_eq!(
            graph.find_cycle(),
            Some(vec!["a".into(), "b".into(), "c".into(), "a".into()])
        );
    }

    #[test]
    fn acyclic_graph_has_no_cycle() {
        let tasks = vec![task("a", &["b"]), task("b", &["c"]), task("c", &[]), task("d", &["b"])];
        assert_eq!(DependencyGraph::build(&tasks).find_cycle(), None);
    }

    #[test]
    fn deep_chain_does_not_overflow() {
        let ids: Vec<String> = (0..20_000).map(|i| format!("n{i}")).collect();
        let tasks: Vec<Task> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| {
                let deps: Vec<&str> = ids.get(i + 1).map(String::as_str).into_iter().collect();
                task(id, &deps)
            })
            .collect();
        assert_eq!(DependencyGraph::build(&tasks).find_cycle(), None);
    }

    #[test]
    fn foreign_task_is_measured_against_batch() {
        let tasks = vec![task("a", &["x"]), task("b", &[])];
        let outsider = task("x", &["b"]);
        // a depends on x (1 of 2 batch tasks), x waits on b
        assert_eq!(dependency_factor(&outsider, &tasks), 0.25);
    }

    #[test]
    fn single_task_has_no_pressure() {
        let tasks = vec![task("solo", &[])];
        assert_eq!(dependency_factor(&tasks[0], &tasks), 0.0);
    }
}
