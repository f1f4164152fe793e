//! Declarative parameter schemas and the generic validator.
//!
//! Each antenna family declares a static [`ParamSchema`]: one rule per
//! accepted parameter with its category, value kind, numeric range,
//! allowed value set and dependency conditions. [`validate`] applies a
//! schema to a caller-supplied mapping and produces a complete
//! [`ParamSet`] or fails atomically; it carries no antenna-specific
//! logic and no hidden state.

use crate::{AntennaError, ParamSet, ParamValue, RawParams, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Mandatory,
    Optional,
    Conditional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Number,
    Text,
}

impl ParamKind {
    fn name(&self) -> &'static str {
        match self {
            ParamKind::Number => "number",
            ParamKind::Text => "text",
        }
    }

    fn matches(&self, value: &ParamValue) -> bool {
        matches!(
            (self, value),
            (ParamKind::Number, ParamValue::Number(_)) | (ParamKind::Text, ParamValue::Text(_))
        )
    }
}

/// A serializable condition over another parameter's raw value.
///
/// Kept to closed comparators (no callbacks) so schemas stay inspectable
/// and testable as data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Requirement {
    Equals(&'static str),
    NotEquals(&'static str),
    GreaterThan(f64),
}

impl Requirement {
    /// Whether the dependency value triggers the conditional parameter.
    ///
    /// An absent dependency satisfies `NotEquals` (anything other than
    /// the named literal, including nothing, counts) and never satisfies
    /// `Equals` or `GreaterThan`.
    fn satisfied_by(&self, value: Option<&ParamValue>) -> bool {
        match (self, value) {
            (Requirement::Equals(want), Some(ParamValue::Text(have))) => have == want,
            (Requirement::Equals(_), _) => false,
            (Requirement::NotEquals(want), Some(ParamValue::Text(have))) => have != want,
            (Requirement::NotEquals(_), Some(_)) => true,
            (Requirement::NotEquals(_), None) => true,
            (Requirement::GreaterThan(limit), Some(ParamValue::Number(have))) => have > limit,
            (Requirement::GreaterThan(_), _) => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dependency {
    pub on: &'static str,
    pub requirement: Requirement,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRule {
    pub name: &'static str,
    pub category: Category,
    pub kind: ParamKind,
    pub range: Option<(f64, f64)>,
    pub allowed: Option<&'static [&'static str]>,
    pub depends_on: &'static [Dependency],
}

impl ParamRule {
    pub const fn mandatory(name: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            category: Category::Mandatory,
            kind,
            range: None,
            allowed: None,
            depends_on: &[],
        }
    }

    pub const fn optional(name: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            category: Category::Optional,
            kind,
            range: None,
            allowed: None,
            depends_on: &[],
        }
    }

    pub const fn conditional(
        name: &'static str,
        kind: ParamKind,
        depends_on: &'static [Dependency],
    ) -> Self {
        Self {
            name,
            category: Category::Conditional,
            kind,
            range: None,
            allowed: None,
            depends_on,
        }
    }

    pub const fn range(mut self, min: f64, max: f64) -> Self {
        self.range = Some((min, max));
        self
    }

    pub const fn allowed(mut self, values: &'static [&'static str]) -> Self {
        self.allowed = Some(values);
        self
    }
}

/// Ordered, immutable schema for one antenna family.
#[derive(Debug, Clone, Copy)]
pub struct ParamSchema {
    pub rules: &'static [ParamRule],
}

/// Validate a raw parameter mapping against a schema.
///
/// Rules are walked in declaration order. The output set is complete and
/// consistent or the call fails with no partial result; unknown keys in
/// the input are dropped, not stored. Pure function of its inputs.
pub fn validate(raw: &RawParams, schema: &ParamSchema) -> Result<ParamSet> {
    let mut validated = ParamSet::default();

    for rule in schema.rules {
        let value = raw.get(rule.name);

        match rule.category {
            Category::Mandatory => {
                if value.is_none() {
                    return Err(AntennaError::MissingParameter(rule.name.to_string()));
                }
            }
            Category::Optional => {}
            Category::Conditional => {
                for dep in rule.depends_on {
                    let dep_value = raw.get(dep.on);
                    if !dep.requirement.satisfied_by(dep_value) {
                        continue;
                    }
                    if value.is_none() {
                        return Err(AntennaError::MissingConditional {
                            param: rule.name.to_string(),
                            dependency: dep.on.to_string(),
                            value: dep_value
                                .map(ToString::to_string)
                                .unwrap_or_else(|| "unset".to_string()),
                        });
                    }
                }
            }
        }

        let Some(value) = value else {
            // Absent optional, or conditional with no triggered
            // dependency: stays unset; defaults are a model concern.
            continue;
        };

        if !rule.kind.matches(value) {
            return Err(AntennaError::TypeMismatch {
                param: rule.name.to_string(),
                expected: rule.kind.name(),
                actual: value.kind(),
            });
        }

        if let (Some((min, max)), Some(n)) = (rule.range, value.as_number()) {
            if n < min || n > max {
                return Err(AntennaError::OutOfRange {
                    param: rule.name.to_string(),
                    min,
                    max,
                    value: n,
                });
            }
        }

        if let (Some(allowed), Some(t)) = (rule.allowed, value.as_text()) {
            if !allowed.contains(&t) {
                return Err(AntennaError::InvalidChoice {
                    param: rule.name.to_string(),
                    allowed,
                    value: t.to_string(),
                });
            }
        }

        validated.insert(rule.name, value.clone());
    }

    Ok(validated)
}

#[cfg(test)]
mod tests {
    use super::*;

    static TEST_SCHEMA: ParamSchema = ParamSchema {
        rules: &[
            ParamRule::mandatory("freq", ParamKind::Number).range(100.0, 1000.0),
            ParamRule::optional("gain", ParamKind::Number).range(-30.0, 60.0),
            ParamRule::mandatory("tilt_type", ParamKind::Text).allowed(&["none", "electrical"]),
            ParamRule::conditional(
                "tilt_angle",
                ParamKind::Number,
                &[Dependency {
                    on: "tilt_type",
                    requirement: Requirement::NotEquals("none"),
                }],
            )
            .range(-90.0, 90.0),
        ],
    };

    fn base_raw() -> RawParams {
        RawParams::new().set("freq", 500.0).set("tilt_type", "none")
    }

    #[test]
    fn test_mandatory_missing_fails() {
        let raw = RawParams::new().set("tilt_type", "none");
        let err = validate(&raw, &TEST_SCHEMA).unwrap_err();
        assert!(matches!(err, AntennaError::MissingParameter(p) if p == "freq"));
    }

    #[test]
    fn test_optional_absent_stays_unset() {
        let set = validate(&base_raw(), &TEST_SCHEMA).unwrap();
        assert!(!set.contains("gain"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_unknown_keys_dropped() {
        let raw = base_raw().set("bogus", 1.0);
        let set = validate(&raw, &TEST_SCHEMA).unwrap();
        assert!(!set.contains("bogus"));
    }

    #[test]
    fn test_type_mismatch() {
        let raw = RawParams::new().set("freq", "500").set("tilt_type", "none");
        let err = validate(&raw, &TEST_SCHEMA).unwrap_err();
        assert!(
            matches!(err, AntennaError::TypeMismatch { ref param, .. } if param == "freq"),
            "got {err:?}"
        );
    }

    #[test]
    fn test_out_of_range() {
        let raw = RawParams::new().set("freq", 50.0).set("tilt_type", "none");
        let err = validate(&raw, &TEST_SCHEMA).unwrap_err();
        assert!(matches!(err, AntennaError::OutOfRange { ref param, .. } if param == "freq"));
    }

    #[test]
    fn test_range_bounds_inclusive() {
        let raw = RawParams::new().set("freq", 100.0).set("tilt_type", "none");
        assert!(validate(&raw, &TEST_SCHEMA).is_ok());
        let raw = RawParams::new().set("freq", 1000.0).set("tilt_type", "none");
        assert!(validate(&raw, &TEST_SCHEMA).is_ok());
    }

    #[test]
    fn test_invalid_choice() {
        let raw = RawParams::new()
            .set("freq", 500.0)
            .set("tilt_type", "mechanical");
        let err = validate(&raw, &TEST_SCHEMA).unwrap_err();
        assert!(matches!(err, AntennaError::InvalidChoice { ref param, .. } if param == "tilt_type"));
    }

    #[test]
    fn test_conditional_triggered_and_missing() {
        let raw = RawParams::new()
            .set("freq", 500.0)
            .set("tilt_type", "electrical");
        let err = validate(&raw, &TEST_SCHEMA).unwrap_err();
        match err {
            AntennaError::MissingConditional {
                param,
                dependency,
                value,
            } => {
                assert_eq!(param, "tilt_angle");
                assert_eq!(dependency, "tilt_type");
                assert_eq!(value, "electrical");
            }
            other => panic!("expected MissingConditional, got {other:?}"),
        }
    }

    #[test]
    fn test_conditional_not_triggered() {
        let set = validate(&base_raw(), &TEST_SCHEMA).unwrap();
        assert!(!set.contains("tilt_angle"));
    }

    #[test]
    fn test_conditional_provided_is_validated() {
        let raw = RawParams::new()
            .set("freq", 500.0)
            .set("tilt_type", "electrical")
            .set("tilt_angle", 120.0);
        let err = validate(&raw, &TEST_SCHEMA).unwrap_err();
        assert!(matches!(err, AntennaError::OutOfRange { ref param, .. } if param == "tilt_angle"));
    }

    #[test]
    fn test_greater_than_requirement() {
        let req = Requirement::GreaterThan(120.0);
        assert!(req.satisfied_by(Some(&ParamValue::Number(130.0))));
        assert!(!req.satisfied_by(Some(&ParamValue::Number(120.0))));
        assert!(!req.satisfied_by(None));
    }
}
