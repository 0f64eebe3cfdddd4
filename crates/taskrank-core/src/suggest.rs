//! "Do next" selection with explanations.
//!
//! The suggester never re-scores or re-ranks: it takes the head of an
//! already ranked list and explains each pick from the data stored on the
//! scored task, so the explanation cannot drift from the score.

use serde::{Deserialize, Serialize};

use crate::scoring::ScoredTask;
use crate::task::Task;

/// Suggestions returned when the caller does not ask for a count.
pub const DEFAULT_SUGGESTION_COUNT: usize = 3;
/// Estimates at or below this many hours count as quick wins.
pub const QUICK_WIN_HOURS: f64 = 2.0;
/// Importance at or above this value counts as high.
pub const HIGH_IMPORTANCE: f64 = 8.0;

/// Why a task was suggested.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    Deadline,
    QuickWin,
    HighImportance,
    BlocksOthers,
    Balanced,
}

impl Reason {
    pub fn message(&self) -> &'static str {
        match self {
            Reason::Deadline => "approaching or passed deadline",
            Reason::QuickWin => "low effort, quick win",
            Reason::HighImportance => "high declared importance",
            Reason::BlocksOthers => "blocks other tasks",
            Reason::Balanced => "balanced priority across all factors",
        }
    }
}

/// Notable reasons for `task`, in fixed order.
///
/// Falls back to [`Reason::Balanced`] when nothing stands out.
pub fn reasons(task: &ScoredTask) -> Vec<Reason> {
    let mut out = Vec::with_capacity(4);
    if task.task.due_date.is_some() {
        out.push(Reason::Deadline);
    }
    if task.task.estimated_hours <= QUICK_WIN_HOURS {
        out.push(Reason::QuickWin);
    }
    if task.task.importance >= HIGH_IMPORTANCE {
        out.push(Reason::HighImportance);
    }
    if task.dependents > 0 {
        out.push(Reason::BlocksOthers);
    }
    if out.is_empty() {
        out.push(Reason::Balanced);
    }
    out
}

/// A recommended task with its justification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Suggestion {
    pub task: Task,
    pub score: f64,
    pub explanation: Vec<String>,
}

impl Suggestion {
    pub fn from_scored(scored: &ScoredTask) -> Self {
        Self {
            task: scored.task.clone(),
            score: scored.score,
            explanation: reasons(scored)
                .iter()
                .map(|r| r.message().to_string())
                .collect(),
        }
    }
}

/// Picks the top `count` tasks of a ranked list.
#[derive(Debug, Clone, Copy)]
pub struct Suggester {
    count: usize,
}

impl Default for Suggester {
    fn default() -> Self {
        Self::new(DEFAULT_SUGGESTION_COUNT)
    }
}

impl Suggester {
    pub fn new(count: usize) -> Self {
        Self { count }
    }

    /// Suggestions for the head of `ranked`; `count` is clamped to its length.
    pub fn suggest(&self, ranked: &[ScoredTask]) -> Vec<Suggestion> {
        ranked
            .iter()
            .take(self.count)
            .map(Suggestion::from_scored)
            .collect()
    }
}

/// Convenience wrapper: top `k` (default 3) of `ranked`.
pub fn suggest(ranked: &[ScoredTask], k: Option<usize>) -> Vec<Suggestion> {
    Suggester::new(k.unwrap_or(DEFAULT_SUGGESTION_COUNT)).suggest(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::Factors;
    use chrono::NaiveDate;

    fn scored(id: &str, hours: f64, importance: f64, due: bool, dependents: usize) -> ScoredTask {
        ScoredTask {
            task: Task {
                id: id.into(),
                title: format!("Task {id}"),
                due_date: due.then(|| NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()),
                estimated_hours: hours,
                importance,
                dependencies: vec![],
            },
            score: 10.0,
            factors: Factors::default(),
            dependents,
        }
    }

    #[test]
    fn explanation_order_is_fixed() {
        let task = scored("t", 1.0, 9.0, true, 2);
        assert_eq!(
            Suggestion::from_scored(&task).explanation,
            vec![
                "approaching or passed deadline",
                "low effort, quick win",
                "high declared importance",
                "blocks other tasks",
            ]
        );
    }

    #[test]
    fn thresholds_are_inclusive() {
        assert_eq!(reasons(&scored("t", 2.0, 8.0, false, 0)), vec![Reason::QuickWin, Reason::HighImportance]);
        assert_eq!(reasons(&scored("t", 2.01, 7.99, false, 0)), vec![Reason::Balanced]);
    }

    #[test]
    fn fallback_when_nothing_notable() {
        let task = scored("t", 5.0, 5.0, false, 0);
        assert_eq!(
            Suggestion::from_scored(&task).explanation,
            vec!["balanced priority across all factors"]
        );
    }

    #[test]
    fn takes_head_without_reranking() {
        let ranked = vec![
            scored("low", 5.0, 1.0, false, 0),
            scored("high", 5.0, 10.0, false, 0),
            scored("mid", 5.0, 5.0, false, 0),
            scored("tail", 5.0, 5.0, false, 0),
        ];
        let picked: Vec<String> = suggest(&ranked, None).into_iter().map(|s| s.task.id).collect();
        assert_eq!(picked, vec!["low", "high", "mid"]);
    }

    #[test]
    fn k_larger_than_input_is_clamped() {
        let ranked = vec![scored("only", 1.0, 5.0, false, 0)];
        assert_eq!(suggest(&ranked, Some(3)).len(), 1);
        assert_eq!(suggest(&ranked, Some(50)).len(), 1);
        assert!(suggest(&[], None).is_empty());
        assert!(suggest(&ranked, Some(0)).is_empty());
    }

    #[test]
    fn suggestion_carries_score() {
        let mut task = scored("t", 1.0, 5.0, false, 0);
        task.score = 42.5;
        assert_eq!(Suggestion::from_scored(&task).score, 42.5);
    }
}
