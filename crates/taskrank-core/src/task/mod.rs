//! Task records.
//!
//! [`RawTask`] is what callers hand us: untrusted, partially filled, with
//! loosely typed fields. [`Task`] is the canonical form produced by
//! [`normalize`], with every default applied and every invariant upheld.

mod lenient;
mod normalize;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use lenient::parse_date;
pub use normalize::{normalize, DEFAULT_ESTIMATED_HOURS, DEFAULT_IMPORTANCE, MAX_IMPORTANCE};

/// Caller-supplied task record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawTask {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub estimated_hours: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_number")]
    pub importance: Option<f64>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub dependencies: Vec<String>,
}

impl RawTask {
    /// Create a raw task with only a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_estimated_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = Some(hours);
        self
    }

    pub fn with_importance(mut self, importance: f64) -> Self {
        self.importance = Some(importance);
        self
    }

    pub fn with_dependencies<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = deps.into_iter().map(Into::into).collect();
        self
    }
}

/// Canonical task with defaults applied.
///
/// Invariants: `id` is unique within its batch, `estimated_hours` is finite
/// and positive, `importance` lies in `[0, 10]`, and `dependencies` holds
/// distinct, trimmed, non-empty ids that never include `id` itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub due_date: Option<NaiveDate>,
    pub estimated_hours: f64,
    pub importance: f64,
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl Task {
    /// Whether this task lists `id` as a prerequisite.
    pub fn depends_on(&self, id: &str) -> bool {
        self.dependencies.iter().any(|d| d == id)
    }
}
