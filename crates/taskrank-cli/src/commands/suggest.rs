//! Suggest from an already scored list (the output of `analyze --json`).

use clap::Args;
use taskrank_core::Config;

use super::read_input;
use crate::render;

#[derive(Args)]
pub struct SuggestArgs {
    /// JSON file with scored tasks, in ranked order ("-" for stdin)
    pub input: String,
    /// Number of suggestions (default: engine.suggest_count)
    #[arg(short, long)]
    pub k: Option<usize>,
    /// Print suggestions as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: SuggestArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let k = args.k.unwrap_or(config.engine.suggest_count);

    let scored = taskrank_core::parse_scored(&read_input(&args.input)?)?;
    let suggestions = taskrank_core::suggest(&scored, Some(k));

    if args.json {
        println!("{}", serde_json::to_string_pretty(&suggestions)?);
    } else {
        render::print_suggestions(&suggestions);
    }
    Ok(())
}
