//! Prediction service errors.

use thiserror::Error;

use crate::cache::CacheError;
use crate::data::TableError;
use crate::features::ProjectError;
use crate::training::TrainError;

use super::rules::RuleTypeError;

/// A prediction request failed. Requests are all-or-nothing: any error
/// means no records are produced.
#[derive(Debug, Error)]
pub enum PredictError {
    /// The task names a dataset the repository does not hold.
    #[error("unknown dataset {0:?}")]
    UnknownDataset(String),

    /// An input field had the wrong type for its rule.
    #[error(transparent)]
    Validation(#[from] RuleTypeError),

    /// Model training or artifact loading failed.
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Feature projection failed (missing column or unseen category).
    #[error(transparent)]
    Project(#[from] ProjectError),

    /// Dataset access failed.
    #[error(transparent)]
    Table(#[from] TableError),
}

impl From<TrainError> for PredictError {
    fn from(err: TrainError) -> Self {
        PredictError::Cache(CacheError::Train(err))
    }
}
