//! Strategy-driven ordering of scored tasks.
//!
//! Sorting is stable: tasks that compare equal keep their relative input
//! order, which also makes ranking idempotent.

use std::cmp::Ordering;

use crate::scoring::{ScoredTask, Strategy};

/// Order `tasks` by `strategy`.
pub fn rank(mut tasks: Vec<ScoredTask>, strategy: Strategy) -> Vec<ScoredTask> {
    sort_by_strategy(&mut tasks, strategy);
    tasks
}

/// In-place variant of [`rank`].
pub fn sort_by_strategy(tasks: &mut [ScoredTask], strategy: Strategy) {
    tasks.sort_by(|a, b| compare(a, b, strategy));
}

/// Comparator for one strategy; `Less` means `a` ranks first.
pub fn compare(a: &ScoredTask, b: &ScoredTask, strategy: Strategy) -> Ordering {
    match strategy {
        Strategy::Smart => b.score.total_cmp(&a.score),
        Strategy::Fast => a.task.estimated_hours.total_cmp(&b.task.estimated_hours),
        Strategy::Impact => b.task.importance.total_cmp(&a.task.importance),
        Strategy::Deadline => match (a.task.due_date, b.task.due_date) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    }
}
