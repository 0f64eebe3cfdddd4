//! TOML-based engine configuration.
//!
//! Stores:
//! - The default ("smart") weight profile
//! - Weight overrides for the `fast`, `impact` and `deadline` strategies
//! - How many suggestions to produce
//!
//! Configuration is stored at `~/.config/taskrank/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::ConfigError;
use crate::scoring::{Strategy, WeightProfile};
use crate::suggest::DEFAULT_SUGGESTION_COUNT;

/// Engine-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineSettings {
    #[serde(default = "default_suggest_count")]
    pub suggest_count: usize,
    #[serde(default)]
    pub default_weights: WeightProfile,
}

/// Weight profiles used by the preset strategies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StrategyWeights {
    #[serde(default = "default_fast")]
    pub fast: WeightProfile,
    #[serde(default = "default_impact")]
    pub impact: WeightProfile,
    #[serde(default = "default_deadline")]
    pub deadline: WeightProfile,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/taskrank/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineSettings,
    #[serde(default)]
    pub strategies: StrategyWeights,
}

// Default functions
fn default_suggest_count() -> usize {
    DEFAULT_SUGGESTION_COUNT
}
fn preset(strategy: Strategy) -> WeightProfile {
    strategy.preset().unwrap_or_default()
}
fn default_fast() -> WeightProfile {
    preset(Strategy::Fast)
}
fn default_impact() -> WeightProfile {
    preset(Strategy::Impact)
}
fn default_deadline() -> WeightProfile {
    preset(Strategy::Deadline)
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            suggest_count: default_suggest_count(),
            default_weights: WeightProfile::default(),
        }
    }
}

impl Default for StrategyWeights {
    fn default() -> Self {
        Self {
            fast: default_fast(),
            impact: default_impact(),
            deadline: default_deadline(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                ),
                serde_json::Value::Number(n) if n.is_u64() => value
                    .parse::<u64>()
                    .map(|v| serde_json::Value::Number(v.into()))
                    .map_err(|_| invalid(format!("cannot parse '{value}' as integer")))?,
                serde_json::Value::Number(_) => value
                    .parse::<f64>()
                    .ok()
                    .and_then(serde_json::Number::from_f64)
                    .map(serde_json::Value::Number)
                    .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?,
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                }
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    /// Path of the config file in the data directory.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing and returning the default when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed or
    /// holds invalid weights, or if the default cannot be written.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            Ok(cfg)
        }
    }

    /// Load and validate a config file at `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let cfg: Config = toml::from_str(&content)?;
        cfg.validate()?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(cfg)
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Check every weight profile and the suggestion count.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let profiles = [
            ("engine.default_weights", &self.engine.default_weights),
            ("strategies.fast", &self.strategies.fast),
            ("strategies.impact", &self.strategies.impact),
            ("strategies.deadline", &self.strategies.deadline),
        ];
        for (key, profile) in profiles {
            profile.validate().map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        }
        if self.engine.suggest_count == 0 {
            return Err(ConfigError::InvalidValue {
                key: "engine.suggest_count".into(),
                message: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Weight profile the given strategy scores with.
    pub fn profile_for(&self, strategy: Strategy) -> WeightProfile {
        match strategy {
            Strategy::Smart => self.engine.default_weights,
            Strategy::Fast => self.strategies.fast,
            Strategy::Impact => self.strategies.impact,
            Strategy::Deadline => self.strategies.deadline,
        }
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a value in memory by dot-separated key, keeping the config valid.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value has the wrong type,
    /// or the result fails validation. `self` is unchanged on error.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a value by key and save. Returns error if key is unknown.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.set_value(key, value)?;
        self.save()
    }
}
