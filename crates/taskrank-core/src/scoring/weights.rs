//! Weight profiles and ranking strategies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;

/// Relative influence of each scoring factor.
///
/// Weights are non-negative but need not sum to 1; see
/// [`WeightProfile::normalized`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WeightProfile {
    #[serde(default)]
    pub urgency: f64,
    #[serde(default)]
    pub importance: f64,
    #[serde(default)]
    pub effort: f64,
    #[serde(default)]
    pub dependency: f64,
}

impl Default for WeightProfile {
    /// The balanced profile used by the `smart` strategy.
    fn default() -> Self {
        Self::new(0.4, 0.3, 0.2, 0.1)
    }
}

impl WeightProfile {
    pub const fn new(urgency: f64, importance: f64, effort: f64, dependency: f64) -> Self {
        Self {
            urgency,
            importance,
            effort,
            dependency,
        }
    }

    fn fields(&self) -> [(&'static str, f64); 4] {
        [
            ("urgency", self.urgency),
            ("importance", self.importance),
            ("effort", self.effort),
            ("dependency", self.dependency),
        ]
    }

    /// Check that every weight is finite and non-negative.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in self.fields() {
            if !value.is_finite() {
                return Err(ValidationError::InvalidWeight {
                    field: field.into(),
                    message: format!("{value} is not a finite number"),
                });
            }
            if value < 0.0 {
                return Err(ValidationError::InvalidWeight {
                    field: field.into(),
                    message: format!("{value} is negative"),
                });
            }
        }
        Ok(())
    }

    /// Scale the weights so they sum to 1.
    ///
    /// An all-zero profile maps to equal weights of 0.25 each.
    pub fn normalized(&self) -> NormalizedWeights {
        let clean = |w: f64| if w.is_finite() && w > 0.0 { w } else { 0.0 };
        let (u, i, e, d) = (
            clean(self.urgency),
            clean(self.importance),
            clean(self.effort),
            clean(self.dependency),
        );
        // Scale by the largest weight first so the sum cannot overflow.
        let max = u.max(i).max(e).max(d);
        if max <= 0.0 {
            return NormalizedWeights::EQUAL;
        }
        let (u, i, e, d) = (u / max, i / max, e / max, d / max);
        let total = u + i + e + d;
        NormalizedWeights {
            urgency: u / total,
            importance: i / total,
            effort: e / total,
            dependency: d / total,
        }
    }

    /// Read a profile from a JSON object.
    ///
    /// Missing fields count as 0. Fields that are present must be numbers;
    /// numeric strings are accepted to match the lenient task fields.
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let obj = value.as_object().ok_or_else(|| ValidationError::InvalidWeight {
            field: "weights".into(),
            message: format!("expected an object, found {}", json_kind(value)),
        })?;

        let read = |field: &str| -> Result<f64, ValidationError> {
            match obj.get(field) {
                None | Some(Value::Null) => Ok(0.0),
                Some(Value::Number(n)) => n.as_f64().ok_or_else(|| ValidationError::InvalidWeight {
                    field: field.into(),
                    message: format!("{n} is not representable"),
                }),
                Some(Value::String(s)) => {
                    s.trim()
                        .parse::<f64>()
                        .map_err(|_| ValidationError::InvalidWeight {
                            field: field.into(),
                            message: format!("'{s}' is not numeric"),
                        })
                }
                Some(other) => Err(ValidationError::InvalidWeight {
                    field: field.into(),
                    message: format!("expected a number, found {}", json_kind(other)),
                }),
            }
        };

        let profile = Self::new(
            read("urgency")?,
            read("importance")?,
            read("effort")?,
            read("dependency")?,
        );
        profile.validate()?;
        Ok(profile)
    }

    /// Parse a profile from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ValidationError> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| ValidationError::MalformedPayload(e.to_string()))?;
        Self::from_value(&value)
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Weights that sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalizedWeights {
    pub urgency: f64,
    pub importance: f64,
    pub effort: f64,
    pub dependency: f64,
}

impl NormalizedWeights {
    pub const EQUAL: Self = Self {
        urgency: 0.25,
        importance: 0.25,
        effort: 0.25,
        dependency: 0.25,
    };
}

/// Named ranking preset.
///
/// Each strategy pairs a sort order (see [`crate::rank`]) with the weight
/// profile used to score, so explanations reflect the same priorities as the
/// ordering.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Weighted score, highest first
    #[default]
    Smart,
    /// Shortest estimate first
    Fast,
    /// Highest importance first
    Impact,
    /// Earliest due date first, undated last
    Deadline,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Smart,
        Strategy::Fast,
        Strategy::Impact,
        Strategy::Deadline,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Smart => "smart",
            Strategy::Fast => "fast",
            Strategy::Impact => "impact",
            Strategy::Deadline => "deadline",
        }
    }

    /// Built-in weight preset, or `None` for the engine default.
    pub fn preset(&self) -> Option<WeightProfile> {
        match self {
            Strategy::Smart => None,
            Strategy::Fast => Some(WeightProfile::new(0.1, 0.1, 0.7, 0.1)),
            Strategy::Impact => Some(WeightProfile::new(0.1, 0.8, 0.05, 0.05)),
            Strategy::Deadline => Some(WeightProfile::new(0.8, 0.1, 0.05, 0.05)),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "smart" => Ok(Strategy::Smart),
            "fast" => Ok(Strategy::Fast),
            "impact" => Ok(Strategy::Impact),
            "deadline" => Ok(Strategy::Deadline),
            _ => Err(ValidationError::UnknownStrategy(s.to_string())),
        }
    }
}
