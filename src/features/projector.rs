//! Projection of raw tables into numeric feature matrices.

use ndarray::Array2;
use thiserror::Error;

use crate::data::{Table, Value};
use crate::encoding::{EncodeError, EncoderRegistry};

use super::schema::{FeatureKind, FeatureSchema};

/// Errors raised while projecting a table into a feature matrix.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// The table is missing a column the schema expects.
    #[error("table is missing feature column {0:?}")]
    MissingColumn(String),

    /// A categorical value could not be encoded.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Projects raw rows into the numeric feature space a classifier expects.
///
/// Borrows the schema and registry captured when the model was trained;
/// the output column order is the schema order, which is the central
/// correctness invariant of the pipeline.
#[derive(Debug, Clone, Copy)]
pub struct FeatureProjector<'a> {
    schema: &'a FeatureSchema,
    registry: &'a EncoderRegistry,
}

impl<'a> FeatureProjector<'a> {
    /// Create a projector over a trained schema and registry.
    pub fn new(schema: &'a FeatureSchema, registry: &'a EncoderRegistry) -> Self {
        Self { schema, registry }
    }

    /// Project the full table into a `[n_rows, n_features]` matrix.
    ///
    /// Categorical cells are substituted with their training-time codes;
    /// numeric and boolean cells pass through (missing numerics become
    /// NaN). Rows keep their input order.
    ///
    /// # Errors
    ///
    /// Fails on a missing feature column or on a categorical value never
    /// seen during training; no partial matrix is produced.
    pub fn project(&self, table: &Table) -> Result<Array2<f32>, ProjectError> {
        let n_rows = table.n_rows();
        let n_features = self.schema.n_features();
        let mut matrix = Array2::zeros((n_rows, n_features));

        for (j, meta) in self.schema.iter().enumerate() {
            let column = table
                .column(&meta.name)
                .map_err(|_| ProjectError::MissingColumn(meta.name.clone()))?;
            match meta.kind {
                FeatureKind::Categorical => {
                    let encoder = self.registry.encoder(&meta.name)?;
                    for (i, value) in column.enumerate() {
                        let code = encoder.transform(&value.category_str())?;
                        matrix[[i, j]] = code as f32;
                    }
                }
                FeatureKind::Numeric => {
                    for (i, value) in column.enumerate() {
                        matrix[[i, j]] = numeric_cell(value);
                    }
                }
            }
        }

        Ok(matrix)
    }

    /// Project a single row into a feature vector in schema order.
    pub fn project_row(&self, table: &Table, row: usize) -> Result<Vec<f32>, ProjectError> {
        let mut out = Vec::with_capacity(self.schema.n_features());
        for meta in self.schema.iter() {
            let value = table
                .get(row, &meta.name)
                .ok_or_else(|| ProjectError::MissingColumn(meta.name.clone()))?;
            match meta.kind {
                FeatureKind::Categorical => {
                    let encoder = self.registry.encoder(&meta.name)?;
                    out.push(encoder.transform(&value.category_str())? as f32);
                }
                FeatureKind::Numeric => out.push(numeric_cell(value)),
            }
        }
        Ok(out)
    }
}

/// Numeric form of a non-categorical cell.
///
/// A string in a column the schema considers numeric cannot happen for the
/// training table (kinds are sniffed from it), but a replaced dataset
/// could; such cells degrade to NaN rather than panicking.
fn numeric_cell(value: &Value) -> f32 {
    value.as_f32().unwrap_or(f32::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (Table, FeatureSchema, EncoderRegistry) {
        let table = Table::new(
            vec!["orbit".into(), "mass".into(), "status".into()],
            vec![
                vec![Value::from("LEO"), Value::from(100.0), Value::from("ok")],
                vec![Value::from("GTO"), Value::from(200.0), Value::from("ok")],
            ],
        )
        .unwrap();
        let schema = FeatureSchema::infer(&table, "status").unwrap();
        let registry = EncoderRegistry::fit(&table, &schema.categorical_columns());
        (table, schema, registry)
    }

    #[test]
    fn projects_in_schema_order() {
        let (table, schema, registry) = fixture();
        let matrix = FeatureProjector::new(&schema, &registry)
            .project(&table)
            .unwrap();

        assert_eq!(matrix.shape(), &[2, 2]);
        // orbit codes: LEO=0, GTO=1; mass passes through.
        assert_eq!(matrix[[0, 0]], 0.0);
        assert_eq!(matrix[[1, 0]], 1.0);
        assert_eq!(matrix[[0, 1]], 100.0);
        assert_eq!(matrix[[1, 1]], 200.0);
    }

    #[test]
    fn column_order_of_the_table_does_not_matter() {
        let (_, schema, registry) = fixture();
        // Same rows, columns permuted.
        let permuted = Table::new(
            vec!["status".into(), "mass".into(), "orbit".into()],
            vec![
                vec![Value::from("ok"), Value::from(100.0), Value::from("LEO")],
                vec![Value::from("ok"), Value::from(200.0), Value::from("GTO")],
            ],
        )
        .unwrap();

        let matrix = FeatureProjector::new(&schema, &registry)
            .project(&permuted)
            .unwrap();
        assert_eq!(matrix[[0, 0]], 0.0);
        assert_eq!(matrix[[0, 1]], 100.0);
        assert_eq!(matrix[[1, 0]], 1.0);
    }

    #[test]
    fn unseen_value_fails_whole_projection() {
        let (_, schema, registry) = fixture();
        let stale = Table::new(
            vec!["orbit".into(), "mass".into(), "status".into()],
            vec![vec![
                Value::from("HEO"),
                Value::from(1.0),
                Value::from("ok"),
            ]],
        )
        .unwrap();

        let err = FeatureProjector::new(&schema, &registry)
            .project(&stale)
            .unwrap_err();
        assert!(matches!(
            err,
            ProjectError::Encode(EncodeError::UnseenValue { .. })
        ));
    }

    #[test]
    fn project_row_matches_matrix_row() {
        let (table, schema, registry) = fixture();
        let projector = FeatureProjector::new(&schema, &registry);
        let matrix = projector.project(&table).unwrap();
        let row = projector.project_row(&table, 1).unwrap();
        assert_eq!(row, matrix.row(1).to_vec());
    }
}
