//! Target vector derivation.

use crate::data::Table;
use crate::encoding::LabelEncoder;

use super::error::TrainError;

/// How the classification target is derived from the raw dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum TargetSpec {
    /// Label-encode an existing categorical column; its distinct values
    /// become the classes.
    Column(String),

    /// Binary target from a textual predicate: class 1 when `needle`
    /// appears (case-insensitively) in the column's text, else class 0.
    TextContains { column: String, needle: String },
}

impl TargetSpec {
    /// The raw column the target is derived from.
    pub fn column(&self) -> &str {
        match self {
            TargetSpec::Column(column) => column,
            TargetSpec::TextContains { column, .. } => column,
        }
    }

    /// Derive the numeric target vector and its class vocabulary.
    ///
    /// # Errors
    ///
    /// Fails if the target column is missing, the dataset is empty, or
    /// fewer than two classes appear.
    pub fn derive(&self, table: &Table) -> Result<TargetVector, TrainError> {
        if table.n_rows() == 0 {
            return Err(TrainError::EmptyDataset);
        }
        let (labels, classes) = match self {
            TargetSpec::Column(column) => {
                let strings: Vec<String> = table
                    .column(column)?
                    .map(|v| v.category_str().into_owned())
                    .collect();
                let encoder = LabelEncoder::fit(strings.iter());
                let labels = strings
                    .iter()
                    .map(|s| {
                        // Every value was just fitted, so transform cannot fail.
                        encoder.transform(s).unwrap_or(0)
                    })
                    .collect();
                (labels, encoder.classes().to_vec())
            }
            TargetSpec::TextContains { column, needle } => {
                let needle = needle.to_lowercase();
                let labels: Vec<u32> = table
                    .column(column)?
                    .map(|v| u32::from(v.category_str().to_lowercase().contains(&needle)))
                    .collect();
                (labels, vec!["false".to_string(), "true".to_string()])
            }
        };

        let distinct = distinct_count(&labels);
        if distinct < 2 {
            return Err(TrainError::SingleClass { classes: distinct });
        }

        Ok(TargetVector {
            labels,
            classes,
        })
    }
}

/// Derived per-row class labels plus the class vocabulary in code order.
#[derive(Debug, Clone)]
pub struct TargetVector {
    /// One class code per row, in row order.
    pub labels: Vec<u32>,
    /// Display vocabulary: `classes[code]` is the raw class value.
    pub classes: Vec<String>,
}

fn distinct_count(labels: &[u32]) -> usize {
    let mut seen = std::collections::HashSet::new();
    labels.iter().filter(|&&l| seen.insert(l)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Value;

    fn remarks_table(rows: &[&str]) -> Table {
        Table::new(
            vec!["Remarks".into()],
            rows.iter().map(|r| vec![Value::from(*r)]).collect(),
        )
        .unwrap()
    }

    #[test]
    fn column_target_encodes_distinct_values() {
        let table = Table::new(
            vec!["status".into()],
            vec![
                vec![Value::from("active")],
                vec![Value::from("retired")],
                vec![Value::from("active")],
            ],
        )
        .unwrap();

        let target = TargetSpec::Column("status".into()).derive(&table).unwrap();
        assert_eq!(target.labels, vec![0, 1, 0]);
        assert_eq!(target.classes, vec!["active", "retired"]);
    }

    #[test]
    fn text_predicate_is_case_insensitive() {
        let table = remarks_table(&[
            "Launch Successful",
            "launch failed",
            "Mission successful.",
        ]);
        let target = TargetSpec::TextContains {
            column: "Remarks".into(),
            needle: "successful".into(),
        }
        .derive(&table)
        .unwrap();
        assert_eq!(target.labels, vec![1, 0, 1]);
    }

    #[test]
    fn single_class_target_is_rejected() {
        let table = remarks_table(&["successful", "also successful"]);
        let err = TargetSpec::TextContains {
            column: "Remarks".into(),
            needle: "successful".into(),
        }
        .derive(&table)
        .unwrap_err();
        assert!(matches!(err, TrainError::SingleClass { classes: 1 }));
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let table = remarks_table(&[]);
        let err = TargetSpec::Column("Remarks".into())
            .derive(&table)
            .unwrap_err();
        assert!(matches!(err, TrainError::EmptyDataset));
    }
}
