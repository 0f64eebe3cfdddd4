//! Full pipeline: raw tasks in, "do next" list out.

use chrono::NaiveDate;
use clap::Args;
use taskrank_core::{parse_tasks, Strategy};

use super::{load_engine, read_input};
use crate::render;

#[derive(Args)]
pub struct NextArgs {
    /// JSON file with a list of tasks ("-" for stdin)
    pub input: String,
    /// Ranking strategy: smart, fast, impact or deadline
    #[arg(long, short, default_value = "smart")]
    pub strategy: Strategy,
    /// Number of suggestions (default: engine.suggest_count)
    #[arg(short, long)]
    pub k: Option<usize>,
    /// Date to measure deadlines against (YYYY-MM-DD, default: today)
    #[arg(long)]
    pub today: Option<NaiveDate>,
    /// Print the full recommendation as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: NextArgs) -> Result<(), Box<dyn std::error::Error>> {
    let engine = load_engine(args.today)?;
    let tasks = parse_tasks(&read_input(&args.input)?)?;
    let rec = engine.recommend(&tasks, args.strategy, args.k)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rec)?);
    } else {
        println!("Do next ({} strategy, as of {}):", rec.strategy, engine.today());
        render::print_suggestions(&rec.suggestions);
    }
    Ok(())
}
