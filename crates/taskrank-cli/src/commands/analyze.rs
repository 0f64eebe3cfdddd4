//! Score and rank a task list.

use chrono::NaiveDate;
use clap::Args;
use taskrank_core::{parse_tasks, Strategy, WeightProfile};

use super::{load_engine, read_input};
use crate::render;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// JSON file with a list of tasks ("-" for stdin)
    pub input: String,
    /// Ranking strategy: smart, fast, impact or deadline
    #[arg(long, short, default_value = "smart")]
    pub strategy: Strategy,
    /// Weight profile as JSON, e.g. '{"urgency":1,"importance":2}';
    /// overrides the strategy's weights for scoring only
    #[arg(long)]
    pub weights: Option<String>,
    /// Date to measure deadlines against (YYYY-MM-DD, default: today)
    #[arg(long)]
    pub today: Option<NaiveDate>,
    /// Print ranked tasks as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: AnalyzeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let engine = load_engine(args.today)?;
    let weights = match args.weights.as_deref() {
        Some(json) => WeightProfile::from_json(json)?,
        None => engine.profile_for(args.strategy),
    };

    let tasks = parse_tasks(&read_input(&args.input)?)?;
    let report = engine.analyze_report(&tasks, Some(&weights))?;
    let ranked = engine.rank(report.tasks, args.strategy);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
    } else {
        println!("Strategy: {}  (as of {})", args.strategy, engine.today());
        render::print_table(&ranked);
        if let Some(cycle) = report.cycle {
            println!();
            println!("note: dependency cycle {}", cycle.join(" -> "));
        }
        for unknown in &report.unknown_dependencies {
            println!(
                "note: {} depends on unknown task {} (treated as done)",
                unknown.task, unknown.missing
            );
        }
    }
    Ok(())
}
