//! Raw-to-canonical task conversion.

use std::collections::HashSet;

use super::{RawTask, Task};
use crate::error::ValidationError;

/// Importance assumed when the caller gives none.
pub const DEFAULT_IMPORTANCE: f64 = 5.0;
/// Upper bound of the importance scale.
pub const MAX_IMPORTANCE: f64 = 10.0;
/// Effort assumed when the caller gives none (or a non-positive value).
pub const DEFAULT_ESTIMATED_HOURS: f64 = 1.0;

/// Convert a batch of raw tasks into canonical tasks, preserving order.
///
/// A missing or blank title is the only rejected input. Everything else is
/// repaired: ids are generated or de-duplicated, importance is clamped,
/// hours are defaulted, and dependency lists are cleaned.
///
/// # Errors
///
/// Returns [`ValidationError::MissingTitle`] for the first task without a
/// usable title. No tasks are returned in that case.
pub fn normalize(raw_tasks: &[RawTask]) -> Result<Vec<Task>, ValidationError> {
    let reserved: HashSet<&str> = raw_tasks
        .iter()
        .filter_map(|raw| raw.id.as_deref().map(str::trim))
        .filter(|id| !id.is_empty())
        .collect();
    let mut used: HashSet<String> = HashSet::with_capacity(raw_tasks.len());
    let mut tasks = Vec::with_capacity(raw_tasks.len());

    for (index, raw) in raw_tasks.iter().enumerate() {
        let title = raw
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(ValidationError::MissingTitle { index })?
            .to_string();

        let id = assign_id(index, raw.id.as_deref(), &reserved, &used);
        used.insert(id.clone());

        let dependencies = clean_dependencies(&id, &raw.dependencies);

        tasks.push(Task {
            estimated_hours: normalize_hours(&id, raw.estimated_hours),
            importance: normalize_importance(&id, raw.importance),
            due_date: raw.due_date,
            dependencies,
            title,
            id,
        });
    }

    tracing::debug!(count = tasks.len(), "normalized task batch");
    Ok(tasks)
}

fn assign_id(
    index: usize,
    explicit: Option<&str>,
    reserved: &HashSet<&str>,
    used: &HashSet<String>,
) -> String {
    let explicit = explicit.map(str::trim).filter(|id| !id.is_empty());

    match explicit {
        Some(id) if !used.contains(id) => id.to_string(),
        Some(id) => {
            let renamed = first_free(id, 2, reserved, used);
            tracing::warn!(original = id, renamed = %renamed, "duplicate task id renamed");
            renamed
        }
        None => {
            let base = format!("task-{}", index + 1);
            if !reserved.contains(base.as_str()) && !used.contains(&base) {
                base
            } else {
                first_free(&base, 2, reserved, used)
            }
        }
    }
}

fn first_free(base: &str, start: usize, reserved: &HashSet<&str>, used: &HashSet<String>) -> String {
    (start..)
        .map(|n| format!("{base}-{n}"))
        .find(|candidate| !reserved.contains(candidate.as_str()) && !used.contains(candidate))
        .unwrap_or_else(|| base.to_string())
}

fn clean_dependencies(own_id: &str, raw: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.iter()
        .map(|d| d.trim())
        .filter(|d| !d.is_empty() && *d != own_id)
        .filter(|d| seen.insert(*d))
        .map(str::to_string)
        .collect()
}

fn normalize_importance(id: &str, importance: Option<f64>) -> f64 {
    match importance {
        Some(v) if v.is_finite() => {
            let clamped = v.clamp(0.0, MAX_IMPORTANCE);
            if clamped != v {
                tracing::warn!(task = id, value = v, clamped, "importance out of range");
            }
            clamped
        }
        Some(v) => {
            tracing::warn!(task = id, value = v, "non-finite importance replaced with default");
            DEFAULT_IMPORTANCE
        }
        None => DEFAULT_IMPORTANCE,
    }
}

fn normalize_hours(id: &str, hours: Option<f64>) -> f64 {
    match hours {
        Some(v) if v.is_finite() && v > 0.0 => v,
        Some(v) => {
            tracing::warn!(task = id, value = v, "non-positive estimate replaced with default");
            DEFAULT_ESTIMATED_HOURS
        }
        None => DEFAULT_ESTIMATED_HOURS,
    }
}
