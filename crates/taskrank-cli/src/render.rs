//! Human-readable output for scored tasks and suggestions.

use taskrank_core::{ScoredTask, Suggestion};

/// Display tier for a score.
///
/// The cut-offs are tuned for the default profile; scores under other
/// profiles still sort correctly but may bunch into one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    High,
    Medium,
    Low,
}

impl Tier {
    pub fn from_score(score: f64) -> Self {
        if score >= 15.0 {
            Tier::High
        } else if score >= 8.0 {
            Tier::Medium
        } else {
            Tier::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tier::High => "high",
            Tier::Medium => "medium",
            Tier::Low => "low",
        }
    }
}

fn due_label(task: &ScoredTask) -> String {
    task.task
        .due_date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn print_table(tasks: &[ScoredTask]) {
    if tasks.is_empty() {
        println!("No tasks.");
        return;
    }

    println!(
        "{:>3}  {:<12} {:>7}  {:<6}  {:<10}  {:>6}  {:>4}  TITLE",
        "#", "ID", "SCORE", "TIER", "DUE", "HOURS", "IMP"
    );
    for (i, t) in tasks.iter().enumerate() {
        println!(
            "{:>3}  {:<12} {:>7.2}  {:<6}  {:<10}  {:>6}  {:>4}  {}",
            i + 1,
            t.task.id,
            t.score,
            Tier::from_score(t.score).label(),
            due_label(t),
            t.task.estimated_hours,
            t.task.importance,
            t.task.title,
        );
    }
}

pub fn print_suggestions(suggestions: &[Suggestion]) {
    if suggestions.is_empty() {
        println!("Nothing to suggest.");
        return;
    }

    for (i, s) in suggestions.iter().enumerate() {
        println!("{}. {} [{}] (score {:.2})", i + 1, s.task.title, s.task.id, s.score);
        for line in &s.explanation {
            println!("   - {line}");
        }
    }
}
