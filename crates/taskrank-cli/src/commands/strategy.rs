//! Strategy inspection commands.

use clap::Subcommand;
use taskrank_core::{Config, Strategy};

#[derive(Subcommand)]
pub enum StrategyAction {
    /// List strategies with their effective weights
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn describe(strategy: Strategy) -> &'static str {
    match strategy {
        Strategy::Smart => "weighted score, highest first",
        Strategy::Fast => "shortest estimate first",
        Strategy::Impact => "highest importance first",
        Strategy::Deadline => "earliest due date first, undated last",
    }
}

pub fn run(action: StrategyAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    match action {
        StrategyAction::List { json: true } => {
            let listing: Vec<_> = Strategy::ALL
                .iter()
                .map(|&s| {
                    serde_json::json!({
                        "strategy": s,
                        "order": describe(s),
                        "weights": config.profile_for(s).normalized(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
        StrategyAction::List { json: false } => {
            println!("Strategies (normalized weights):");
            println!();
            for s in Strategy::ALL {
                let w = config.profile_for(s).normalized();
                println!("  {} - {}", s, describe(s));
                println!(
                    "    urgency {:.2}  importance {:.2}  effort {:.2}  dependency {:.2}",
                    w.urgency, w.importance, w.effort, w.dependency
                );
            }
        }
    }
    Ok(())
}
