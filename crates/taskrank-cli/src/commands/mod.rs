pub mod analyze;
pub mod config;
pub mod next;
pub mod strategy;
pub mod suggest;

use std::io::Read;

use chrono::NaiveDate;
use taskrank_core::{Config, Engine};

/// Read a JSON payload from a file path, or stdin when the path is `-`.
pub fn read_input(path: &str) -> Result<String, Box<dyn std::error::Error>> {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path).map_err(|e| format!("cannot read {path}: {e}").into())
    }
}

/// Build an engine from the on-disk config, scoring against `today`
/// (the local calendar date when not given).
pub fn load_engine(today: Option<NaiveDate>) -> Result<Engine, Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let today = today.unwrap_or_else(|| chrono::Local::now().date_naive());
    tracing::debug!(%today, "building engine");
    Ok(Engine::from_config(&config, today))
}
