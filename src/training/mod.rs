//! Classifier training: target derivation, seeded splitting, and
//! random-forest growing.

mod config;
mod error;
mod grow;
mod split;
mod target;
mod trainer;

pub use config::TrainConfig;
pub use error::TrainError;
pub use split::train_test_split;
pub use target::{TargetSpec, TargetVector};
pub use trainer::{FeatureSelection, ForestTrainer, TrainPlan};
