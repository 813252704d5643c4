//! Training errors.

use thiserror::Error;

use crate::data::TableError;
use crate::features::ProjectError;

/// Errors that abort a training attempt.
///
/// All variants are fatal to the attempt and surfaced to the caller; no
/// retry is performed and no artifact is stored.
#[derive(Debug, Error)]
pub enum TrainError {
    /// The dataset has no rows to learn from.
    #[error("cannot train on an empty dataset")]
    EmptyDataset,

    /// The derived target has fewer than two classes; a single-class
    /// model would be degenerate.
    #[error("target has {classes} class(es), need at least 2")]
    SingleClass { classes: usize },

    /// The target or a feature column was missing or malformed.
    #[error(transparent)]
    Table(#[from] TableError),

    /// Feature projection failed.
    #[error(transparent)]
    Project(#[from] ProjectError),
}
