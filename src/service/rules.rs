//! Field-based classification rules.
//!
//! A rule maps one raw field to a display label without any trained
//! model. Only [`FieldRule::ContainsText`] is strict about its input
//! type; the other rules treat unexpected values as the negative case,
//! matching the source system's behavior.

use thiserror::Error;

use crate::data::Value;

/// A fixed classification rule over one raw column.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldRule {
    /// `then_label` when the column's text equals `expected`, otherwise
    /// `else_label`. Missing or non-text values compare unequal.
    Equals {
        column: String,
        expected: String,
        then_label: String,
        else_label: String,
    },

    /// `then_label` when the column's text contains `needle`
    /// (case-sensitively), otherwise `else_label`. A missing or
    /// non-text value fails the whole request.
    ContainsText {
        column: String,
        needle: String,
        then_label: String,
        else_label: String,
    },

    /// `then_label` when the column is a true flag, otherwise
    /// `else_label`. Missing or non-boolean values are falsy.
    Flag {
        column: String,
        then_label: String,
        else_label: String,
    },
}

/// Rule evaluation failure: the input field had the wrong type.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("column {column:?} must be textual for this prediction")]
pub struct RuleTypeError {
    /// The offending column.
    pub column: String,
}

impl FieldRule {
    /// The column this rule reads.
    pub fn column(&self) -> &str {
        match self {
            FieldRule::Equals { column, .. }
            | FieldRule::ContainsText { column, .. }
            | FieldRule::Flag { column, .. } => column,
        }
    }

    /// Evaluate against one row's value of [`column`](Self::column).
    pub fn evaluate(&self, value: Option<&Value>) -> Result<&str, RuleTypeError> {
        match self {
            FieldRule::Equals {
                expected,
                then_label,
                else_label,
                ..
            } => {
                let matched = value.and_then(Value::as_str) == Some(expected.as_str());
                Ok(if matched { then_label } else { else_label })
            }
            FieldRule::ContainsText {
                column,
                needle,
                then_label,
                else_label,
            } => match value.and_then(Value::as_str) {
                Some(text) => Ok(if text.contains(needle.as_str()) {
                    then_label
                } else {
                    else_label
                }),
                None => Err(RuleTypeError {
                    column: column.clone(),
                }),
            },
            FieldRule::Flag {
                then_label,
                else_label,
                ..
            } => {
                let set = value.and_then(Value::as_bool).unwrap_or(false);
                Ok(if set { then_label } else { else_label })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capsule_rule() -> FieldRule {
        FieldRule::Equals {
            column: "status".into(),
            expected: "active".into(),
            then_label: "Reusable".into(),
            else_label: "Retired".into(),
        }
    }

    #[test]
    fn equals_matches_exact_text() {
        let rule = capsule_rule();
        assert_eq!(rule.evaluate(Some(&Value::from("active"))).unwrap(), "Reusable");
        assert_eq!(rule.evaluate(Some(&Value::from("retired"))).unwrap(), "Retired");
        // Non-text compares unequal rather than failing.
        assert_eq!(rule.evaluate(Some(&Value::from(1.0))).unwrap(), "Retired");
        assert_eq!(rule.evaluate(None).unwrap(), "Retired");
    }

    #[test]
    fn contains_is_case_sensitive_and_strict() {
        let rule = FieldRule::ContainsText {
            column: "Application".into(),
            needle: "Commercial".into(),
            then_label: "Commercial".into(),
            else_label: "Government".into(),
        };
        assert_eq!(
            rule.evaluate(Some(&Value::from("Commercial comms"))).unwrap(),
            "Commercial"
        );
        assert_eq!(
            rule.evaluate(Some(&Value::from("commercial comms"))).unwrap(),
            "Government"
        );
        // Numbers are a type error, not a negative match.
        let err = rule.evaluate(Some(&Value::from(42.0))).unwrap_err();
        assert_eq!(err.column, "Application");
        assert!(rule.evaluate(None).is_err());
    }

    #[test]
    fn flag_treats_missing_as_falsy() {
        let rule = FieldRule::Flag {
            column: "active".into(),
            then_label: "In Service".into(),
            else_label: "Not in Service".into(),
        };
        assert_eq!(rule.evaluate(Some(&Value::from(true))).unwrap(), "In Service");
        assert_eq!(rule.evaluate(Some(&Value::from(false))).unwrap(), "Not in Service");
        assert_eq!(rule.evaluate(Some(&Value::Null)).unwrap(), "Not in Service");
        assert_eq!(rule.evaluate(None).unwrap(), "Not in Service");
    }
}
