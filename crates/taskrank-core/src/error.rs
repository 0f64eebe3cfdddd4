//! Core error types for taskrank-core.
//!
//! Validation failures abort a call with no partial output. Cosmetic bad
//! input (out-of-range importance, non-positive hours) is never an error;
//! the normalizer repairs it instead.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for taskrank-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Validation errors raised at the engine boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Task without a usable title
    #[error("Task at index {index} is missing a title")]
    MissingTitle { index: usize },

    /// Payload was valid JSON but not a list
    #[error("Expected a list of tasks, found {found}")]
    NotAList { found: String },

    /// Payload could not be parsed at all
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// A list element could not be read as a task
    #[error("Invalid task at index {index}: {message}")]
    InvalidTask { index: usize, message: String },

    /// Weight that is not a finite, non-negative number
    #[error("Invalid weight for '{field}': {message}")]
    InvalidWeight { field: String, message: String },

    /// Strategy name not in the known set
    #[error("Unknown strategy '{0}' (expected one of: smart, fast, impact, deadline)")]
    UnknownStrategy(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// No home directory to place the configuration in
    #[error("Could not determine configuration directory")]
    NoConfigDir,
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
