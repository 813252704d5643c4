//! Per-column encoder registry.

use std::collections::BTreeMap;

use crate::data::Table;

use super::encoder::LabelEncoder;
use super::error::EncodeError;

/// One [`LabelEncoder`] per categorical column, built once per training
/// run and carried inside the model artifact.
///
/// The registry is what keeps training and inference consistent: the
/// projector always encodes through the registry that was fitted when the
/// model was trained, never through a fresh fit over the inference data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EncoderRegistry {
    encoders: BTreeMap<String, LabelEncoder>,
}

impl EncoderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fit one encoder per listed column over a table's category strings.
    ///
    /// Columns are encoded via [`Value::category_str`], so mixed-type
    /// columns stringify the same way at fit and transform time.
    ///
    /// # Panics
    ///
    /// Debug-asserts that every listed column exists; schema construction
    /// upstream guarantees it.
    ///
    /// [`Value::category_str`]: crate::data::Value::category_str
    pub fn fit(table: &Table, columns: &[String]) -> Self {
        let mut encoders = BTreeMap::new();
        for column in columns {
            let values = table.column(column);
            debug_assert!(values.is_ok(), "schema listed unknown column {column:?}");
            if let Ok(values) = values {
                let encoder = LabelEncoder::fit(values.map(|v| v.category_str().into_owned()));
                encoders.insert(column.clone(), encoder);
            }
        }
        Self { encoders }
    }

    /// Insert an encoder for a column (used when loading artifacts).
    pub fn insert(&mut self, column: impl Into<String>, encoder: LabelEncoder) {
        self.encoders.insert(column.into(), encoder);
    }

    /// The encoder trained for a column.
    ///
    /// # Errors
    ///
    /// [`EncodeError::MissingEncoder`] if no encoder was fitted for the
    /// column.
    pub fn encoder(&self, column: &str) -> Result<&LabelEncoder, EncodeError> {
        self.encoders
            .get(column)
            .ok_or_else(|| EncodeError::MissingEncoder {
                column: column.to_string(),
            })
    }

    /// Iterate over `(column, encoder)` pairs in column-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LabelEncoder)> {
        self.encoders.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of encoded columns.
    pub fn len(&self) -> usize {
        self.encoders.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.encoders.is_empty()
    }
}
