//! Prediction output records.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::data::Value;

/// One per-row prediction: identifying columns from the source row plus
/// the derived label(s), in insertion order.
///
/// Records are ephemeral: constructed per request, handed to the caller,
/// never persisted. Serializing a record yields a flat JSON object whose
/// keys keep their insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictionRecord {
    fields: Vec<(String, Value)>,
}

impl PredictionRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field.
    pub fn push(&mut self, key: impl Into<String>, value: Value) {
        self.fields.push((key.into(), value));
    }

    /// Look up a field by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for PredictionRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
