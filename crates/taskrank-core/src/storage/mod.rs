mod config;

pub use config::{Config, EngineSettings, StrategyWeights};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the directory holding `config.toml`.
///
/// `TASKRANK_HOME` wins when set. Otherwise `~/.config/taskrank`, or
/// `~/.config/taskrank-dev` when `TASKRANK_ENV=dev`.
///
/// # Errors
/// Returns an error if no home directory can be determined or if creating
/// the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("TASKRANK_HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home),
        _ => {
            let base_dir = dirs::home_dir().ok_or(ConfigError::NoConfigDir)?.join(".config");
            let env = std::env::var("TASKRANK_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("taskrank-dev")
            } else {
                base_dir.join("taskrank")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::SaveFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}
