//! Task priority scoring.
//!
//! A task's score is a weighted sum of four factors, each in `[0, 1]`,
//! scaled by 100:
//! - Urgency: deadline proximity
//! - Importance: declared importance
//! - Effort: shorter tasks rate higher (quick wins)
//! - Dependency: pressure from other tasks waiting on this one
//!
//! Weights come from a [`WeightProfile`], normalized to sum to 1 before use.

pub mod dependency;
pub mod factors;
mod scorer;
mod weights;

pub use dependency::{dependency_factor, DependencyGraph, READINESS_PENALTY};
pub use factors::Factors;
pub use scorer::{ScoredTask, Scorer, SCORE_SCALE};
pub use weights::{NormalizedWeights, Strategy, WeightProfile};

pub(crate) use weights::json_kind;
