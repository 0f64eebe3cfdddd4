//! Prioritization engine facade.
//!
//! Wires normalizer, scorer, ranker and suggester into the two caller-facing
//! operations, [`Engine::analyze`] and [`Engine::suggest`], plus the full
//! [`Engine::recommend`] pipeline. The engine holds only immutable settings
//! and the injected date, so one instance can serve concurrent callers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::payload;
use crate::rank;
use crate::scoring::{DependencyGraph, ScoredTask, Scorer, Strategy, WeightProfile};
use crate::storage::Config;
use crate::suggest::{Suggester, Suggestion};
use crate::task::{normalize, RawTask};

/// A prerequisite id that is not part of the batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnknownDependency {
    pub task: String,
    pub missing: String,
}

/// Scored tasks plus non-fatal dependency diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisReport {
    pub tasks: Vec<ScoredTask>,
    /// One dependency cycle, as a closed path of ids, if any exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cycle: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unknown_dependencies: Vec<UnknownDependency>,
}

/// Output of the full pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub strategy: Strategy,
    /// All tasks, ranked by `strategy`.
    pub analysis: AnalysisReport,
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Clone)]
pub struct Engine {
    config: Config,
    today: NaiveDate,
}

impl Engine {
    /// Engine with built-in defaults, scoring against `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self::from_config(&Config::default(), today)
    }

    pub fn from_config(config: &Config, today: NaiveDate) -> Self {
        Self {
            config: config.clone(),
            today,
        }
    }

    /// Replace the profile used when `analyze` gets no weights.
    pub fn with_default_profile(mut self, profile: WeightProfile) -> Self {
        self.config.engine.default_weights = profile;
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn default_profile(&self) -> WeightProfile {
        self.config.engine.default_weights
    }

    /// Weight profile matched to a strategy.
    pub fn profile_for(&self, strategy: Strategy) -> WeightProfile {
        self.config.profile_for(strategy)
    }

    /// Score raw tasks, returned in input order.
    ///
    /// `weights` overrides the default profile for this call only.
    ///
    /// # Errors
    ///
    /// Fails on a missing title or an invalid weight; nothing is returned
    /// in that case.
    pub fn analyze(
        &self,
        tasks: &[RawTask],
        weights: Option<&WeightProfile>,
    ) -> Result<Vec<ScoredTask>, ValidationError> {
        Ok(self.analyze_report(tasks, weights)?.tasks)
    }

    /// [`Engine::analyze`] with dependency diagnostics.
    pub fn analyze_report(
        &self,
        tasks: &[RawTask],
        weights: Option<&WeightProfile>,
    ) -> Result<AnalysisReport, ValidationError> {
        let profile = match weights {
            Some(w) => {
                w.validate()?;
                *w
            }
            None => self.default_profile(),
        };

        let tasks = normalize(tasks)?;
        let graph = DependencyGraph::build(&tasks);

        let cycle = graph.find_cycle();
        if let Some(ref path) = cycle {
            tracing::warn!(cycle = %path.join(" -> "), "dependency cycle detected");
        }
        let unknown_dependencies: Vec<UnknownDependency> = graph
            .unknown_dependencies()
            .into_iter()
            .map(|(task, missing)| UnknownDependency { task, missing })
            .collect();
        for unknown in &unknown_dependencies {
            tracing::debug!(task = %unknown.task, missing = %unknown.missing, "dependency outside batch treated as satisfied");
        }

        let scored = Scorer::new(&profile, self.today).score_with_graph(&tasks, &graph);
        tracing::debug!(count = scored.len(), today = %self.today, "analyzed tasks");

        Ok(AnalysisReport {
            tasks: scored,
            cycle,
            unknown_dependencies,
        })
    }

    /// Order scored tasks by `strategy`.
    pub fn rank(&self, tasks: Vec<ScoredTask>, strategy: Strategy) -> Vec<ScoredTask> {
        rank::rank(tasks, strategy)
    }

    /// Top `k` of an already ranked list, with explanations.
    ///
    /// `k` defaults to the configured suggestion count.
    pub fn suggest(&self, ranked: &[ScoredTask], k: Option<usize>) -> Vec<Suggestion> {
        Suggester::new(k.unwrap_or(self.config.engine.suggest_count)).suggest(ranked)
    }

    /// Score with the strategy's profile, rank by it, then suggest.
    pub fn recommend(
        &self,
        tasks: &[RawTask],
        strategy: Strategy,
        k: Option<usize>,
    ) -> Result<Recommendation, ValidationError> {
        let profile = self.profile_for(strategy);
        let mut analysis = self.analyze_report(tasks, Some(&profile))?;
        analysis.tasks = self.rank(analysis.tasks, strategy);
        let suggestions = self.suggest(&analysis.tasks, k);

        Ok(Recommendation {
            strategy,
            analysis,
            suggestions,
        })
    }

    /// [`Engine::analyze`] over JSON text: a task list and optional weights.
    pub fn analyze_json(
        &self,
        tasks_json: &str,
        weights_json: Option<&str>,
    ) -> Result<Vec<ScoredTask>, ValidationError> {
        let weights = weights_json.map(WeightProfile::from_json).transpose()?;
        let tasks = payload::parse_tasks(tasks_json)?;
        self.analyze(&tasks, weights.as_ref())
    }

    /// [`Engine::suggest`] over a JSON list of scored tasks.
    pub fn suggest_json(
        &self,
        scored_json: &str,
        k: Option<usize>,
    ) -> Result<Vec<Suggestion>, ValidationError> {
        let scored = payload::parse_scored(scored_json)?;
        Ok(self.suggest(&scored, k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn analyze_fails_atomically_on_missing_title() {
        let engine = Engine::new(today());
        let tasks = vec![RawTask::new("ok"), RawTask::default()];
        assert_eq!(
            engine.analyze(&tasks, None),
            Err(ValidationError::MissingTitle { index: 1 })
        );
    }

    #[test]
    fn analyze_rejects_invalid_weights() {
        let engine = Engine::new(today());
        let bad = WeightProfile::new(-1.0, 1.0, 1.0, 1.0);
        assert!(matches!(
            engine.analyze(&[RawTask::new("a")], Some(&bad)),
            Err(ValidationError::InvalidWeight { .. })
        ));
    }

    #[test]
    fn weights_override_applies_to_one_call() {
        let engine = Engine::new(today());
        let tasks = vec![RawTask::new("a").with_importance(10.0)];
        let only_importance = WeightProfile::new(0.0, 1.0, 0.0, 0.0);

        let overridden = engine.analyze(&tasks, Some(&only_importance)).unwrap();
        assert!((overridden[0].score - 100.0).abs() < 1e-9);

        let default = engine.analyze(&tasks, None).unwrap();
        assert!(default[0].score < 100.0);
    }

    #[test]
    fn huge_weight_override_keeps_its_ratio() {
        let engine = Engine::new(today());
        let tasks = vec![RawTask::new("a")
            .with_importance(10.0)
            .with_estimated_hours(1000.0)];
        let huge = WeightProfile::new(0.0, 1e308, 1e308, 0.0);

        let scored = engine.analyze(&tasks, Some(&huge)).unwrap();
        let expected = 100.0 * (0.5 + 0.5 / 1001.0);
        assert!((scored[0].score - expected).abs() < 1e-9);
    }

    #[test]
    fn report_carries_cycle_and_unknown_dependencies() {
        let engine = Engine::new(today());
        let tasks = vec![
            RawTask::new("a").with_id("a").with_dependencies(["b"]),
            RawTask::new("b").with_id("b").with_dependencies(["a", "zzz"]),
        ];
        let report = engine.analyze_report(&tasks, None).unwrap();
        assert_eq!(report.tasks.len(), 2);
        assert_eq!(report.cycle, Some(vec!["a".into(), "b".into(), "a".into()]));
        assert_eq!(
            report.unknown_dependencies,
            vec![UnknownDependency {
                task: "b".into(),
                missing: "zzz".into()
            }]
        );
    }

    #[test]
    fn recommend_uses_strategy_profile_and_order() {
        let engine = Engine::new(today());
        let tasks = vec![
            RawTask::new("long").with_id("long").with_estimated_hours(8.0).with_importance(9.0),
            RawTask::new("short").with_id("short").with_estimated_hours(0.5).with_importance(2.0),
        ];
        let rec = engine.recommend(&tasks, Strategy::Fast, Some(1)).unwrap();

        assert_eq!(rec.strategy, Strategy::Fast);
        assert_eq!(rec.analysis.tasks[0].task.id, "short");
        assert_eq!(rec.suggestions.len(), 1);
        assert_eq!(rec.suggestions[0].task.id, "short");
        assert!(rec.suggestions[0]
            .explanation
            .contains(&"low effort, quick win".to_string()));
    }

    #[test]
    fn suggest_defaults_to_configured_count() {
        let mut config = Config::default();
        config.engine.suggest_count = 2;
        let engine = Engine::from_config(&config, today());
        let scored = engine
            .analyze(
                &[RawTask::new("a"), RawTask::new("b"), RawTask::new("c")],
                None,
            )
            .unwrap();
        assert_eq!(engine.suggest(&scored, None).len(), 2);
        assert_eq!(engine.suggest(&scored, Some(3)).len(), 3);
    }

    #[test]
    fn json_entry_points_validate_shape() {
        let engine = Engine::new(today());
        assert!(matches!(
            engine.analyze_json(r#"{"title": "x"}"#, None),
            Err(ValidationError::NotAList { .. })
        ));
        assert!(matches!(
            engine.analyze_json(r#"[{"title": "x"}]"#, Some(r#"{"urgency": "soon"}"#)),
            Err(ValidationError::InvalidWeight { .. })
        ));

        let scored = engine.analyze_json(r#"[{"title": "x"}]"#, None).unwrap();
        let json = serde_json::to_string(&scored).unwrap();
        let suggestions = engine.suggest_json(&json, None).unwrap();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].score, scored[0].score);
    }
}
