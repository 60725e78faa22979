// src/domain/constraint.rs
//
// Constraint violation taxonomy
//
// Every field-level check returns an `Outcome`. Setters and constructors
// return the same violation as their error, so an entity can never be
// observed in a state its checks would reject.

use serde::Serialize;
use thiserror::Error;

/// A failed validation rule, carrying the message shown next to the field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstraintViolation {
    #[error("{0}")]
    MandatoryValueMissing(String),

    #[error("{0}")]
    Range(String),

    #[error("{0}")]
    Uniqueness(String),

    #[error("{0}")]
    StringLength(String),

    #[error("{0}")]
    Interval(String),

    #[error("{0}")]
    ReferentialIntegrity(String),

    #[error("{0}")]
    FrozenValue(String),

    #[error("{0}")]
    Generic(String),
}

/// Result of a field-level check. `Ok(())` is the "no violation" outcome.
pub type Outcome = Result<(), ConstraintViolation>;

/// Names every outcome kind, including the successful one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    NoViolation,
    MandatoryValueMissing,
    RangeViolation,
    UniquenessViolation,
    StringLengthViolation,
    IntervalViolation,
    ReferentialIntegrityViolation,
    FrozenValueViolation,
    GenericConstraintViolation,
}

impl ConstraintViolation {
    pub fn kind(&self) -> ViolationKind {
        match self {
            ConstraintViolation::MandatoryValueMissing(_) => ViolationKind::MandatoryValueMissing,
            ConstraintViolation::Range(_) => ViolationKind::RangeViolation,
            ConstraintViolation::Uniqueness(_) => ViolationKind::UniquenessViolation,
            ConstraintViolation::StringLength(_) => ViolationKind::StringLengthViolation,
            ConstraintViolation::Interval(_) => ViolationKind::IntervalViolation,
            ConstraintViolation::ReferentialIntegrity(_) => {
                ViolationKind::ReferentialIntegrityViolation
            }
            ConstraintViolation::FrozenValue(_) => ViolationKind::FrozenValueViolation,
            ConstraintViolation::Generic(_) => ViolationKind::GenericConstraintViolation,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ConstraintViolation::MandatoryValueMissing(m)
            | ConstraintViolation::Range(m)
            | ConstraintViolation::Uniqueness(m)
            | ConstraintViolation::StringLength(m)
            | ConstraintViolation::Interval(m)
            | ConstraintViolation::ReferentialIntegrity(m)
            | ConstraintViolation::FrozenValue(m)
            | ConstraintViolation::Generic(m) => m,
        }
    }
}

impl std::fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ViolationKind::NoViolation => "NoConstraintViolation",
            ViolationKind::MandatoryValueMissing => "MandatoryValueConstraintViolation",
            ViolationKind::RangeViolation => "RangeConstraintViolation",
            ViolationKind::UniquenessViolation => "UniquenessConstraintViolation",
            ViolationKind::StringLengthViolation => "StringLengthConstraintViolation",
            ViolationKind::IntervalViolation => "IntervalConstraintViolation",
            ViolationKind::ReferentialIntegrityViolation => {
                "ReferentialIntegrityConstraintViolation"
            }
            ViolationKind::FrozenValueViolation => "FrozenValueConstraintViolation",
            ViolationKind::GenericConstraintViolation => "ConstraintViolation",
        };
        f.write_str(name)
    }
}

/// Form-feedback accessors on an `Outcome`.
pub trait OutcomeExt {
    /// Empty string when the value is valid.
    fn message(&self) -> &str;
    fn kind(&self) -> ViolationKind;
}

impl OutcomeExt for Outcome {
    fn message(&self) -> &str {
        match self {
            Ok(()) => "",
            Err(violation) => violation.message(),
        }
    }

    fn kind(&self) -> ViolationKind {
        match self {
            Ok(()) => ViolationKind::NoViolation,
            Err(violation) => violation.kind(),
        }
    }
}

/// Parses a raw form value as an integer.
///
/// Blank input means "no value" and yields `Ok(None)`. Anything else must be
/// an integer literal, otherwise a range violation naming `field` is returned.
pub fn parse_integer(raw: &str, field: &str) -> Result<Option<i64>, ConstraintViolation> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<i64>()
        .map(Some)
        .map_err(|_| ConstraintViolation::Range(format!("The {} must be an integer!", field)))
}

/// Shared rule for mandatory, bounded, non-blank strings (names and titles).
pub(crate) fn check_bounded_text(value: Option<&str>, field: &str, max_len: usize) -> Outcome {
    let value = match value {
        None => {
            return Err(ConstraintViolation::MandatoryValueMissing(format!(
                "A value for the {} must be provided!",
                field
            )))
        }
        Some(v) => v,
    };
    if value.is_empty() {
        return Err(ConstraintViolation::MandatoryValueMissing(format!(
            "A value for the {} must be provided!",
            field
        )));
    }
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConstraintViolation::Range(format!(
            "The {} must be a non-empty string!",
            field
        )));
    }
    if trimmed.chars().count() > max_len {
        return Err(ConstraintViolation::StringLength(format!(
            "The {} can have up to {} characters!",
            field, max_len
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_outcome_has_empty_message() {
        let outcome: Outcome = Ok(());
        assert_eq!(outcome.message(), "");
        assert_eq!(outcome.kind(), ViolationKind::NoViolation);
    }

    #[test]
    fn test_violation_exposes_kind_and_message() {
        let outcome: Outcome = Err(ConstraintViolation::Interval("too early".to_string()));
        assert_eq!(outcome.message(), "too early");
        assert_eq!(outcome.kind(), ViolationKind::IntervalViolation);
        assert_eq!(
            ViolationKind::IntervalViolation.to_string(),
            "IntervalConstraintViolation"
        );
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer("  ", "id"), Ok(None));
        assert_eq!(parse_integer(" 42 ", "id"), Ok(Some(42)));
        assert_eq!(parse_integer("-3", "id"), Ok(Some(-3)));
        assert!(matches!(
            parse_integer("4x", "id"),
            Err(ConstraintViolation::Range(_))
        ));
    }

    #[test]
    fn test_bounded_text_rules() {
        assert!(check_bounded_text(Some("Star Wars"), "title", 120).is_ok());
        assert!(matches!(
            check_bounded_text(None, "title", 120),
            Err(ConstraintViolation::MandatoryValueMissing(_))
        ));
        assert!(matches!(
            check_bounded_text(Some(""), "title", 120),
            Err(ConstraintViolation::MandatoryValueMissing(_))
        ));
        assert!(matches!(
            check_bounded_text(Some("   "), "title", 120),
            Err(ConstraintViolation::Range(_))
        ));
        let long = "x".repeat(121);
        assert!(matches!(
            check_bounded_text(Some(&long), "title", 120),
            Err(ConstraintViolation::StringLength(_))
        ));
        assert!(check_bounded_text(Some(&"x".repeat(120)), "title", 120).is_ok());
    }
}
