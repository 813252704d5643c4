//! launchcast: batch classification over space-launch datasets.
//!
//! This crate provides a tabular encode/train/predict pipeline: CSV
//! datasets are loaded into an in-memory repository, categorical columns
//! are label-encoded, random forests are trained and persisted to disk,
//! and prediction services turn each dataset row into a labeled record.

pub mod cache;
pub mod data;
pub mod encoding;
pub mod features;
pub mod forest;
pub mod model;
pub mod persist;
pub mod service;
pub mod training;

pub use cache::{ModelCache, ModelKey};
pub use data::{DatasetRepository, Table, Value};
pub use model::TrainedModel;
pub use service::{PredictionService, TaskSpec};
pub use training::{ForestTrainer, TrainConfig, TrainPlan};
