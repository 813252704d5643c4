//! Batch prediction services over the registered datasets.
//!
//! A [`TaskSpec`] declares what one prediction endpoint does; the
//! [`PredictionService`] executes it against the repository, training
//! and caching models on first use. Output is a [`PredictionRecord`]
//! per input row, in input order.

mod error;
mod lifetime;
mod predictor;
mod record;
mod rules;
mod task;

pub use error::PredictError;
pub use lifetime::mission_lifetime;
pub use predictor::{LaunchDetails, PredictionService};
pub use record::PredictionRecord;
pub use rules::{FieldRule, RuleTypeError};
pub use task::{LabelRule, LifetimeField, Strategy, TaskSpec};
