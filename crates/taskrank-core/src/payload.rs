//! JSON boundary for task lists.
//!
//! Validates the shape of a payload before any engine work: the top level
//! must be a list and every element an object. Field-level leniency lives in
//! [`crate::task::RawTask`].

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ValidationError;
use crate::scoring::{json_kind, ScoredTask};
use crate::task::RawTask;

/// Parse a JSON list of raw tasks.
pub fn parse_tasks(json: &str) -> Result<Vec<RawTask>, ValidationError> {
    parse_list(json)
}

/// Parse a JSON list of already scored tasks.
pub fn parse_scored(json: &str) -> Result<Vec<ScoredTask>, ValidationError> {
    parse_list(json)
}

fn parse_list<T: DeserializeOwned>(json: &str) -> Result<Vec<T>, ValidationError> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| ValidationError::MalformedPayload(e.to_string()))?;
    list_from_value(value)
}

fn list_from_value<T: DeserializeOwned>(value: Value) -> Result<Vec<T>, ValidationError> {
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(ValidationError::NotAList {
                found: json_kind(&other).to_string(),
            })
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            if !item.is_object() {
                return Err(ValidationError::InvalidTask {
                    index,
                    message: format!("expected an object, found {}", json_kind(&item)),
                });
            }
            serde_json::from_value(item).map_err(|e| ValidationError::InvalidTask {
                index,
                message: e.to_string(),
            })
        })
        .collect()
}
