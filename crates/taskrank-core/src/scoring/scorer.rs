//! Weighted task scoring.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::dependency::DependencyGraph;
use super::factors::{finite_or_zero, local_factors, Factors};
use super::weights::{NormalizedWeights, WeightProfile};
use crate::task::Task;

/// Multiplier that lifts the unit-range weighted sum into 0-100.
pub const SCORE_SCALE: f64 = 100.0;

/// A task with its computed priority.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredTask {
    #[serde(flatten)]
    pub task: Task,
    pub score: f64,
    pub factors: Factors,
    /// Other tasks in the batch that list this one as a dependency.
    #[serde(default)]
    pub dependents: usize,
}

/// Scores tasks under one weight profile against an injected "today".
#[derive(Debug, Clone)]
pub struct Scorer {
    weights: NormalizedWeights,
    today: NaiveDate,
}

impl Scorer {
    pub fn new(profile: &WeightProfile, today: NaiveDate) -> Self {
        Self {
            weights: profile.normalized(),
            today,
        }
    }

    /// Score every task in the batch, preserving input order.
    pub fn score(&self, tasks: &[Task]) -> Vec<ScoredTask> {
        let graph = DependencyGraph::build(tasks);
        self.score_with_graph(tasks, &graph)
    }

    pub(crate) fn score_with_graph(&self, tasks: &[Task], graph: &DependencyGraph<'_>) -> Vec<ScoredTask> {
        tasks
            .iter()
            .enumerate()
            .map(|(i, task)| {
                let factors = Factors {
                    dependency: graph.factor_at(i),
                    ..local_factors(task, self.today)
                }
                .sanitized();

                ScoredTask {
                    score: self.combine(&factors),
                    factors,
                    dependents: graph.dependents_at(i),
                    task: task.clone(),
                }
            })
            .collect()
    }

    /// Weighted sum of already-sanitized factors, scaled by [`SCORE_SCALE`].
    pub fn combine(&self, factors: &Factors) -> f64 {
        let w = &self.weights;
        let sum = w.urgency * factors.urgency
            + w.importance * factors.importance
            + w.effort * factors.effort
            + w.dependency * factors.dependency;
        finite_or_zero(SCORE_SCALE * sum).max(0.0)
    }
}
