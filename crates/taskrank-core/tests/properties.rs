//! Property tests for scoring, ranking and dependency invariants.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use taskrank_core::scoring::dependency_factor;
use taskrank_core::{normalize, rank, suggest, RawTask, Scorer, Task, WeightProfile};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

fn arb_weight() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0), 0.0f64..10.0, 0.0f64..1e12]
}

fn arb_profile() -> impl Strategy<Value = WeightProfile> {
    (arb_weight(), arb_weight(), arb_weight(), arb_weight())
        .prop_map(|(u, i, e, d)| WeightProfile::new(u, i, e, d))
}

fn arb_strategy() -> impl Strategy<Value = taskrank_core::Strategy> {
    prop_oneof![
        Just(taskrank_core::Strategy::Smart),
        Just(taskrank_core::Strategy::Fast),
        Just(taskrank_core::Strategy::Impact),
        Just(taskrank_core::Strategy::Deadline),
    ]
}

/// Raw tasks with ids `t0..tn`, loose field values and random edges.
fn arb_batch() -> impl Strategy<Value = Vec<RawTask>> {
    prop::collection::vec(
        (
            prop::option::of(-400i64..400),
            prop::option::of(prop_oneof![-5.0f64..100.0, Just(f64::NAN), Just(f64::INFINITY)]),
            prop::option::of(prop_oneof![-20.0f64..30.0, Just(f64::NAN)]),
            prop::collection::vec(0usize..12, 0..4),
        ),
        1..10,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (due, hours, importance, deps))| RawTask {
                id: Some(format!("t{i}")),
                title: Some(format!("Task {i}")),
                due_date: due.map(|d| today() + Duration::days(d)),
                estimated_hours: hours,
                importance,
                dependencies: deps.into_iter().map(|d| format!("t{d}")).collect(),
            })
            .collect()
    })
}

fn canonical(raw: &[RawTask]) -> Vec<Task> {
    normalize(raw).expect("generated tasks always have titles")
}

proptest! {
    #[test]
    fn scores_are_finite_and_non_negative(batch in arb_batch(), profile in arb_profile()) {
        let tasks = canonical(&batch);
        for scored in Scorer::new(&profile, today()).score(&tasks) {
            prop_assert!(scored.score.is_finite());
            prop_assert!(scored.score >= 0.0);
            for f in [scored.factors.urgency, scored.factors.importance, scored.factors.effort, scored.factors.dependency] {
                prop_assert!((0.0..=1.0).contains(&f));
            }
        }
    }

    #[test]
    fn ranking_is_idempotent(batch in arb_batch(), strategy in arb_strategy()) {
        let scored = Scorer::new(&WeightProfile::default(), today()).score(&canonical(&batch));
        let once = rank(scored, strategy);
        let twice = rank(once.clone(), strategy);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn scoring_is_deterministic(batch in arb_batch(), profile in arb_profile()) {
        let tasks = canonical(&batch);
        let a = Scorer::new(&profile, today()).score(&tasks);
        let b = Scorer::new(&profile, today()).score(&tasks);
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(suggest(&a, None), suggest(&b, None));
    }

    #[test]
    fn raising_importance_never_lowers_score(
        batch in arb_batch(),
        profile in arb_profile(),
        target in 0usize..10,
        bump in 0.0f64..10.0,
    ) {
        prop_assume!(profile.importance > 0.0);
        let mut tasks = canonical(&batch);
        let idx = target % tasks.len();
        let scorer = Scorer::new(&profile, today());

        let before = scorer.score(&tasks)[idx].score;
        tasks[idx].importance = (tasks[idx].importance + bump).min(10.0);
        let after = scorer.score(&tasks)[idx].score;
        prop_assert!(after >= before, "before={} after={}", before, after);
    }

    #[test]
    fn new_dependent_never_lowers_dependency_factor(batch in arb_batch(), target in 0usize..10) {
        let mut tasks = canonical(&batch);
        let idx = target % tasks.len();
        let before = dependency_factor(&tasks[idx], &tasks);

        let target_id = tasks[idx].id.clone();
        tasks.push(Task {
            id: "newcomer".into(),
            title: "Newcomer".into(),
            due_date: None,
            estimated_hours: 1.0,
            importance: 5.0,
            dependencies: vec![target_id],
        });
        let after = dependency_factor(&tasks[idx], &tasks);
        prop_assert!(after >= before, "before={} after={}", before, after);
    }

    #[test]
    fn deadline_strategy_puts_undated_last(batch in arb_batch(), profile in arb_profile()) {
        let scored = Scorer::new(&profile, today()).score(&canonical(&batch));
        let ranked = rank(scored, taskrank_core::Strategy::Deadline);
        let first_undated = ranked.iter().position(|t| t.task.due_date.is_none()).unwrap_or(ranked.len());
        prop_assert!(ranked[first_undated..].iter().all(|t| t.task.due_date.is_none()));
    }

    #[test]
    fn suggestion_count_is_clamped(batch in arb_batch(), k in 0usize..20) {
        let scored = Scorer::new(&WeightProfile::default(), today()).score(&canonical(&batch));
        prop_assert_eq!(suggest(&scored, Some(k)).len(), k.min(scored.len()));
        for s in suggest(&scored, Some(k)) {
            prop_assert!(!s.explanation.is_empty());
        }
    }
}
