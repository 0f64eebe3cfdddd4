//! Per-factor scoring functions.
//!
//! Each factor maps one task attribute into `[0, 1]`:
//! - Urgency: deadline proximity, 0 without a deadline, 1 when overdue
//! - Importance: declared importance over the 0-10 scale
//! - Effort: inverse of estimated hours, so short tasks rate higher
//! - Dependency: computed by [`super::dependency`]

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::task::{Task, MAX_IMPORTANCE};

/// Normalized factor values retained with each scored task.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Factors {
    pub urgency: f64,
    pub importance: f64,
    pub effort: f64,
    pub dependency: f64,
}

impl Factors {
    /// Replace any non-finite factor with 0.
    pub fn sanitized(self) -> Self {
        Self {
            urgency: finite_or_zero(self.urgency),
            importance: finite_or_zero(self.importance),
            effort: finite_or_zero(self.effort),
            dependency: finite_or_zero(self.dependency),
        }
    }
}

pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Deadline proximity in `[0, 1]`.
///
/// No due date gives 0, so a missing deadline never inflates priority.
/// Overdue gives 1. Otherwise `1 / (1 + days_until_due)`: 1 on the due date,
/// 0.125 a week out.
pub fn urgency(due_date: Option<NaiveDate>, today: NaiveDate) -> f64 {
    let Some(due) = due_date else {
        return 0.0;
    };

    let days = (due - today).num_days();
    if days < 0 {
        1.0
    } else {
        1.0 / (1.0 + days as f64)
    }
}

/// Declared importance scaled to `[0, 1]`.
pub fn importance(importance: f64) -> f64 {
    importance.clamp(0.0, MAX_IMPORTANCE) / MAX_IMPORTANCE
}

/// Quick-win factor: `1 / (1 + hours)`.
pub fn effort(estimated_hours: f64) -> f64 {
    1.0 / (1.0 + estimated_hours.max(0.0))
}

/// Compute the three task-local factors; `dependency` is filled in by the
/// caller from the batch-wide graph.
pub fn local_factors(task: &Task, today: NaiveDate) -> Factors {
    Factors {
        urgency: urgency(task.due_date, today),
        importance: importance(task.importance),
        effort: effort(task.estimated_hours),
        dependency: 0.0,
    }
}
