//! Raw cell values.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A raw value in a tabular dataset.
///
/// Values are loaded once and never mutated; the pipeline derives numeric
/// feature matrices from them without touching the originals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Free-form text or a categorical label.
    Str(String),
    /// A numeric value (integers are widened to `f64` at load time).
    Num(f64),
    /// A boolean flag.
    Bool(bool),
    /// A missing cell.
    Null,
}

impl Value {
    /// The string payload, if this is a text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The numeric payload, if this is a number.
    pub fn as_num(&self) -> Option<f64> {
        match self {
            Value::Num(n) => Some(*n),
            _ => None,
        }
    }

    /// The boolean payload, if this is a flag.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Whether the cell is missing.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Canonical string form used for categorical encoding.
    ///
    /// Every value has a category string so that columns with mixed raw
    /// types still encode deterministically: numbers and booleans are
    /// stringified, missing cells become `"nan"`.
    pub fn category_str(&self) -> Cow<'_, str> {
        match self {
            Value::Str(s) => Cow::Borrowed(s),
            Value::Num(n) => Cow::Owned(format_num(*n)),
            Value::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
            Value::Null => Cow::Borrowed("nan"),
        }
    }

    /// Numeric form for feature projection.
    ///
    /// Booleans map to 0.0/1.0, missing cells to NaN. Text has no numeric
    /// form; categorical columns go through the encoder instead.
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Value::Num(n) => Some(*n as f32),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Null => Some(f32::NAN),
            Value::Str(_) => None,
        }
    }
}

/// Format a number the way the source data renders it: integral values
/// without a trailing `.0`.
fn format_num(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Num(n) => f.write_str(&format_num(*n)),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Null => f.write_str(""),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Num(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_str_covers_all_variants() {
        assert_eq!(Value::from("GSLV").category_str(), "GSLV");
        assert_eq!(Value::from(42.0).category_str(), "42");
        assert_eq!(Value::from(1.5).category_str(), "1.5");
        assert_eq!(Value::from(true).category_str(), "true");
        assert_eq!(Value::Null.category_str(), "nan");
    }

    #[test]
    fn as_f32_passthrough() {
        assert_eq!(Value::from(3.0).as_f32(), Some(3.0));
        assert_eq!(Value::from(true).as_f32(), Some(1.0));
        assert_eq!(Value::from(false).as_f32(), Some(0.0));
        assert!(Value::Null.as_f32().unwrap().is_nan());
        assert_eq!(Value::from("text").as_f32(), None);
    }

    #[test]
    fn serializes_untagged() {
        assert_eq!(
            serde_json::to_string(&Value::from("LEO")).unwrap(),
            "\"LEO\""
        );
        assert_eq!(serde_json::to_string(&Value::from(2.5)).unwrap(), "2.5");
        assert_eq!(serde_json::to_string(&Value::Null).unwrap(), "null");
    }
}
