//! # taskrank Core Library
//!
//! This library ranks a batch of tasks by computed priority and recommends a
//! short "do next" list with human-readable justifications. It is a pure
//! function pipeline: every call works on its own copy of the input and no
//! state survives between calls. The `taskrank` CLI is a thin layer over the
//! same library.
//!
//! ## Architecture
//!
//! - **Normalizer**: repairs untrusted task records into canonical [`Task`]s
//! - **Scorer**: weighted sum of urgency, importance, effort and dependency
//!   factors under a [`WeightProfile`]
//! - **Dependency Resolver**: direct-edge blocking pressure, cycle safe
//! - **Ranker**: stable ordering per [`Strategy`]
//! - **Suggester**: top-K selection with fixed-order explanations
//!
//! ## Key Components
//!
//! - [`Engine`]: `analyze` / `suggest` / `recommend` entry points
//! - [`Config`]: TOML-backed engine configuration
//! - [`ValidationError`]: the only failure a well-formed call can hit

pub mod engine;
pub mod error;
pub mod payload;
pub mod rank;
pub mod scoring;
pub mod storage;
pub mod suggest;
pub mod task;

pub use engine::{AnalysisReport, Engine, Recommendation, UnknownDependency};
pub use error::{ConfigError, CoreError, ValidationError};
pub use payload::{parse_scored, parse_tasks};
pub use rank::rank;
pub use scoring::{Factors, ScoredTask, Scorer, Strategy, WeightProfile};
pub use storage::Config;
pub use suggest::{suggest, Reason, Suggester, Suggestion};
pub use task::{normalize, RawTask, Task};
