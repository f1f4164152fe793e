//! ITU-R Reference Antenna Pattern Library
//!
//! Models antenna radiation behavior per several ITU-R Recommendations
//! for use in spectrum-sharing and interference studies:
//! - validates physical/engineering parameters against a declarative
//!   per-family schema,
//! - computes antenna gain (dBi) from closed-form piecewise envelopes,
//! - samples full horizontal/vertical radiation patterns for export.
//!
//! Supported families: F.699-8, F.1245-3, F.1336-5 (low-gain,
//! omnidirectional, sectoral), S.465-6 and S.580-6.
//!
//! # Example
//!
//! ```
//! use itu_antenna::{create_model, AntennaModel, Direction, ModelFamily, RawParams};
//!
//! let mut model = create_model(ModelFamily::F699);
//! model
//!     .set_params(
//!         &RawParams::new()
//!             .set("oper_freq_mhz", 23000.0)
//!             .set("max_gain_dbi", 45.0)
//!             .set("diameter_m", 6.0),
//!     )
//!     .unwrap();
//!
//! let g = model.gain(Direction::off_axis(3.0)).unwrap();
//! assert!((g.unwrap() - 20.07).abs() < 0.05);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

pub mod direction;
pub mod export;
pub mod models;
pub mod pattern;
pub mod schema;

pub use direction::Direction;
pub use export::{CsvExport, Exporter, JsonExport, MsiExport, YamlExport};
pub use models::{create_model, AntennaModel, ModelFamily};
pub use pattern::{PatternPoint, PatternSpec};

#[derive(Error, Debug)]
pub enum AntennaError {
    #[error("missing required parameter '{0}'")]
    MissingParameter(String),
    #[error("missing required parameter '{param}' because '{dependency}' is set to '{value}'")]
    MissingConditional {
        param: String,
        dependency: String,
        value: String,
    },
    #[error("'{param}' must be a {expected}, got a {actual}")]
    TypeMismatch {
        param: String,
        expected: &'static str,
        actual: &'static str,
    },
    #[error("'{param}' must be in range [{min}, {max}], got {value}")]
    OutOfRange {
        param: String,
        min: f64,
        max: f64,
        value: f64,
    },
    #[error("'{param}' must be one of {allowed:?}, got '{value}'")]
    InvalidChoice {
        param: String,
        allowed: &'static [&'static str],
        value: String,
    },
    #[error("inconsistent parameters: {0}")]
    Inconsistent(String),
    #[error("model '{model}' expects a {expected} direction, got {got}")]
    DirectionMismatch {
        model: &'static str,
        expected: &'static str,
        got: &'static str,
    },
    #[error("unknown model '{0}'; available: ITUF699, ITUF1245, ITUF1336lg, ITUF1336o, ITUF1336s, ITUS465, ITUS580")]
    UnknownModel(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, AntennaError>;

/// A single raw or validated parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(f64),
    Text(String),
}

impl ParamValue {
    pub fn kind(&self) -> &'static str {
        match self {
            ParamValue::Number(_) => "number",
            ParamValue::Text(_) => "text",
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParamValue::Number(n) => Some(*n),
            ParamValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Number(_) => None,
            ParamValue::Text(t) => Some(t.as_str()),
        }
    }
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamValue::Number(n) => write!(f, "{n}"),
            ParamValue::Text(t) => write!(f, "{t}"),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Number(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Number(value as f64)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

/// Caller-supplied parameter mapping handed to [`AntennaModel::set_params`].
///
/// Keys not present in the target model's schema are dropped silently
/// during validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawParams {
    values: BTreeMap<String, ParamValue>,
}

impl RawParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter, consuming and returning the mapping for chaining.
    pub fn set(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.values.insert(name.to_string(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }
}

/// A validated (and derived) parameter set owned by a model instance.
///
/// Built fresh on every successful `set_params` call; an empty set means
/// the instance has not been parameterized yet, and every typed accessor
/// then fails with the missing-parameter error class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParamSet {
    values: BTreeMap<String, ParamValue>,
}

impl ParamSet {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Numeric parameter, failing when absent or non-numeric.
    pub fn num(&self, name: &str) -> Result<f64> {
        match self.values.get(name) {
            None => Err(AntennaError::MissingParameter(name.to_string())),
            Some(ParamValue::Number(n)) => Ok(*n),
            Some(other) => Err(AntennaError::TypeMismatch {
                param: name.to_string(),
                expected: "number",
                actual: other.kind(),
            }),
        }
    }

    /// Numeric parameter that may be absent.
    pub fn opt_num(&self, name: &str) -> Option<f64> {
        self.values.get(name).and_then(ParamValue::as_number)
    }

    /// Text parameter, failing when absent or non-text.
    pub fn text(&self, name: &str) -> Result<&str> {
        match self.values.get(name) {
            None => Err(AntennaError::MissingParameter(name.to_string())),
            Some(ParamValue::Text(t)) => Ok(t.as_str()),
            Some(other) => Err(AntennaError::TypeMismatch {
                param: name.to_string(),
                expected: "text",
                actual: other.kind(),
            }),
        }
    }

    pub fn insert_num(&mut self, name: &str, value: f64) {
        self.values.insert(name.to_string(), ParamValue::Number(value));
    }

    pub fn insert_text(&mut self, name: &str, value: &str) {
        self.values
            .insert(name.to_string(), ParamValue::Text(value.to_string()));
    }

    pub(crate) fn insert(&mut self, name: &str, value: ParamValue) {
        self.values.insert(name.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_value_kinds() {
        assert_eq!(ParamValue::Number(1.0).kind(), "number");
        assert_eq!(ParamValue::from("peak").kind(), "text");
        assert_eq!(ParamValue::from(23000_i64).as_number(), Some(23000.0));
        assert_eq!(ParamValue::from("peak").as_text(), Some("peak"));
    }

    #[test]
    fn test_param_set_accessors() {
        let mut set = ParamSet::default();
        set.insert_num("oper_freq_mhz", 23000.0);
        set.insert_text("pattern_type", "peak");

        assert_eq!(set.num("oper_freq_mhz").unwrap(), 23000.0);
        assert_eq!(set.text("pattern_type").unwrap(), "peak");
        assert!(matches!(
            set.num("missing"),
            Err(AntennaError::MissingParameter(p)) if p == "missing"
        ));
        assert!(matches!(
            set.num("pattern_type"),
            Err(AntennaError::TypeMismatch { .. })
        ));
        assert_eq!(set.opt_num("oper_freq_mhz"), Some(23000.0));
        assert_eq!(set.opt_num("absent"), None);
    }

    #[test]
    fn test_empty_set_reports_missing() {
        let set = ParamSet::default();
        assert!(set.is_empty());
        assert!(matches!(
            set.num("d_to_l"),
            Err(AntennaError::MissingParameter(_))
        ));
    }
}
