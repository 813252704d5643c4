//! Label encoding for a single categorical column.

use std::collections::HashMap;

use super::error::EncodeError;

/// Bijective mapping between raw categorical strings and dense codes.
///
/// Codes are assigned in first-occurrence order during [`fit`](Self::fit),
/// so two fits over identically-ordered input produce identical mappings.
/// The encoder is owned by exactly one training run; the codes it assigned
/// are the only valid codes at inference time.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelEncoder {
    classes: Vec<String>,
    index: HashMap<String, u32>,
}

impl LabelEncoder {
    /// Fit an encoder over raw category strings.
    ///
    /// Each distinct value gets the next dense zero-based code; repeats
    /// keep their first code.
    pub fn fit<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut classes = Vec::new();
        let mut index = HashMap::new();
        for value in values {
            let value = value.as_ref();
            if !index.contains_key(value) {
                index.insert(value.to_string(), classes.len() as u32);
                classes.push(value.to_string());
            }
        }
        Self { classes, index }
    }

    /// Rebuild an encoder from its persisted class list.
    ///
    /// Class order is the code order, so the artifact only needs to store
    /// the list.
    pub fn from_classes(classes: Vec<String>) -> Self {
        let index = classes
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i as u32))
            .collect();
        Self { classes, index }
    }

    /// The training-time code of a raw value.
    ///
    /// # Errors
    ///
    /// [`EncodeError::UnseenValue`] for a value never observed during
    /// training; unseen values have no valid code.
    pub fn transform(&self, value: &str) -> Result<u32, EncodeError> {
        self.index
            .get(value)
            .copied()
            .ok_or_else(|| EncodeError::UnseenValue {
                value: value.to_string(),
            })
    }

    /// The raw value behind a code, if the code was assigned.
    pub fn inverse(&self, code: u32) -> Option<&str> {
        self.classes.get(code as usize).map(String::as_str)
    }

    /// All classes in code order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Number of distinct classes.
    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }
}
