//! Tabular dataset container.
//!
//! [`Table`] is the raw-value counterpart of a feature matrix: an ordered
//! sequence of rows over a fixed column set. Tables are loaded once and
//! treated as immutable; the pipeline derives encoded copies instead of
//! mutating rows in place.

use std::collections::HashMap;

use super::error::TableError;
use super::value::Value;

/// An immutable tabular dataset with a fixed, named column set.
///
/// Storage is row-major (`rows[i][j]` is column `j` of row `i`), matching
/// how the prediction services walk the data: one output record per input
/// row, in input order.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<String>,
    name_index: HashMap<String, usize>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create a table from column names and row-major values.
    ///
    /// # Errors
    ///
    /// Returns [`TableError`] if column names are duplicated or any row's
    /// width differs from the column count.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self, TableError> {
        let mut name_index = HashMap::with_capacity(columns.len());
        for (i, name) in columns.iter().enumerate() {
            if name_index.insert(name.clone(), i).is_some() {
                return Err(TableError::DuplicateColumn(name.clone()));
            }
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(TableError::RowWidthMismatch {
                    row: i,
                    expected: columns.len(),
                    got: row.len(),
                });
            }
        }
        Ok(Self {
            columns,
            name_index,
            rows,
        })
    }

    /// Number of rows.
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    #[inline]
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Ordered column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Index of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.name_index.get(name).copied()
    }

    /// Whether the table has a column with this name.
    pub fn has_column(&self, name: &str) -> bool {
        self.name_index.contains_key(name)
    }

    /// The value at `(row, column-name)`, or `None` for an unknown column.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let col = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[col])
    }

    /// Iterate over one column's values in row order.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::UnknownColumn`] if the column does not exist.
    pub fn column(&self, name: &str) -> Result<impl Iterator<Item = &Value> + '_, TableError> {
        let col = self
            .column_index(name)
            .ok_or_else(|| TableError::UnknownColumn(name.to_string()))?;
        Ok(self.rows.iter().map(move |r| &r[col]))
    }

    /// Iterate over rows as value slices, in input order.
    pub fn rows(&self) -> impl Iterator<Item = &[Value]> + '_ {
        self.rows.iter().map(|r| r.as_slice())
    }

    /// Distinct category strings of a column, in first-occurrence order.
    ///
    /// Backs the details views that list the label vocabulary of a column
    /// (orbit types, launch vehicles, applications).
    pub fn unique_strings(&self, name: &str) -> Result<Vec<String>, TableError> {
        let mut seen = HashMap::new();
        let mut out = Vec::new();
        for value in self.column(name)? {
            let s = value.category_str().into_owned();
            if seen.insert(s.clone(), ()).is_none() {
                out.push(s);
            }
        }
        Ok(out)
    }
}
