//! Errors for dataset construction and loading.

use thiserror::Error;

/// Errors that can occur while building or loading a [`Table`](super::Table).
#[derive(Debug, Error)]
pub enum TableError {
    /// A row's cell count does not match the column set.
    #[error("row {row} has {got} cells, expected {expected}")]
    RowWidthMismatch {
        row: usize,
        expected: usize,
        got: usize,
    },

    /// Two columns share the same name.
    #[error("duplicate column name: {0:?}")]
    DuplicateColumn(String),

    /// A lookup referenced a column the table does not have.
    #[error("unknown column: {0:?}")]
    UnknownColumn(String),

    /// The CSV source had no header row.
    #[error("CSV source has no header row")]
    MissingHeader,

    /// Underlying CSV reader error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Underlying I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
