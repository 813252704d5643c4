//! Feature schema: the ordered feature list a model is trained on.

use crate::data::{Table, TableError, Value};

/// How a feature column is turned into a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
    /// Numeric or boolean column, cast to `f32` verbatim.
    Numeric,
    /// String-valued column, substituted with its encoder code.
    Categorical,
}

impl FeatureKind {
    /// Returns true for categorical features.
    #[inline]
    pub fn is_categorical(&self) -> bool {
        matches!(self, FeatureKind::Categorical)
    }
}

/// Metadata for a single feature column.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMeta {
    /// Source column name.
    pub name: String,
    /// How the column is projected.
    pub kind: FeatureKind,
}

/// Ordered feature list captured at training time.
///
/// The schema, not the dataset, defines feature order: the projector walks
/// the schema so the matrix layout is identical between the training call
/// and every later inference call, no matter how the table's columns are
/// arranged.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSchema {
    features: Vec<FeatureMeta>,
}

impl FeatureSchema {
    /// Build a schema from explicit metadata.
    pub fn from_features(features: Vec<FeatureMeta>) -> Self {
        Self { features }
    }

    /// Infer a schema from a table: every column except the target, in
    /// the table's column order at training time.
    ///
    /// A column is categorical iff any of its values is a string;
    /// numeric and boolean columns pass through as numbers.
    ///
    /// # Errors
    ///
    /// [`TableError::UnknownColumn`] if the target column does not exist.
    pub fn infer(table: &Table, target: &str) -> Result<Self, TableError> {
        if !table.has_column(target) {
            return Err(TableError::UnknownColumn(target.to_string()));
        }
        let mut features = Vec::new();
        for name in table.columns() {
            if name == target {
                continue;
            }
            let is_categorical = table
                .column(name)?
                .any(|v| matches!(v, Value::Str(_)));
            features.push(FeatureMeta {
                name: name.clone(),
                kind: if is_categorical {
                    FeatureKind::Categorical
                } else {
                    FeatureKind::Numeric
                },
            });
        }
        Ok(Self { features })
    }

    /// Build an all-categorical schema over an explicit column list.
    ///
    /// Used when the task fixes its feature columns up front and coerces
    /// every value to a category string (the ISRO pipeline).
    pub fn categorical(columns: &[&str]) -> Self {
        let features = columns
            .iter()
            .map(|name| FeatureMeta {
                name: (*name).to_string(),
                kind: FeatureKind::Categorical,
            })
            .collect();
        Self { features }
    }

    /// Number of features.
    pub fn n_features(&self) -> usize {
        self.features.len()
    }

    /// Iterate over feature metadata in projection order.
    pub fn iter(&self) -> impl Iterator<Item = &FeatureMeta> {
        self.features.iter()
    }

    /// Names of the categorical columns, in schema order.
    pub fn categorical_columns(&self) -> Vec<String> {
        self.features
            .iter()
            .filter(|m| m.kind.is_categorical())
            .map(|m| m.name.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        Table::new(
            vec![
                "capsule_id".into(),
                "status".into(),
                "landings".into(),
                "reuse_count".into(),
            ],
            vec![
                vec![
                    Value::from("C101"),
                    Value::from("active"),
                    Value::from(1.0),
                    Value::from(0.0),
                ],
                vec![
                    Value::from("C102"),
                    Value::from("retired"),
                    Value::Null,
                    Value::from(2.0),
                ],
            ],
        )
        .unwrap()
    }

    #[test]
    fn infer_excludes_target_and_sniffs_kinds() {
        let schema = FeatureSchema::infer(&table(), "status").unwrap();
        let names: Vec<_> = schema.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["capsule_id", "landings", "reuse_count"]);
        assert_eq!(schema.iter().next().unwrap().kind, FeatureKind::Categorical);
        assert_eq!(schema.categorical_columns(), vec!["capsule_id"]);
    }

    #[test]
    fn infer_unknown_target_fails() {
        assert!(matches!(
            FeatureSchema::infer(&table(), "nope"),
            Err(TableError::UnknownColumn(_))
        ));
    }

    #[test]
    fn explicit_categorical_schema() {
        let schema = FeatureSchema::categorical(&["Launch Vehicle", "Orbit Type", "Application"]);
        assert_eq!(schema.n_features(), 3);
        assert!(schema.iter().all(|m| m.kind.is_categorical()));
    }
}
