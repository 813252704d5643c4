//! Trained model artifact.

use ndarray::ArrayView2;

use crate::encoding::EncoderRegistry;
use crate::features::{FeatureProjector, FeatureSchema, ProjectError};
use crate::forest::Forest;
use crate::data::Table;
use crate::training::TargetSpec;

/// Target semantics bound into a trained model.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetInfo {
    /// How the target vector was derived at training time.
    pub spec: TargetSpec,
    /// Class vocabulary in code order: `classes[code]` is the raw value.
    pub classes: Vec<String>,
}

/// An immutable trained classifier.
///
/// Binds the feature schema, the encoder registry fitted during training,
/// the forest parameters, and the target semantics. Created by the
/// trainer, persisted once, loaded read-only thereafter; replacing a
/// model means deleting its artifact and retraining.
#[derive(Debug, Clone)]
pub struct TrainedModel {
    schema: FeatureSchema,
    registry: EncoderRegistry,
    forest: Forest,
    target: TargetInfo,
}

impl TrainedModel {
    /// Assemble a model from its parts (trainer and artifact loader).
    pub fn from_parts(
        schema: FeatureSchema,
        registry: EncoderRegistry,
        forest: Forest,
        target: TargetInfo,
    ) -> Self {
        Self {
            schema,
            registry,
            forest,
            target,
        }
    }

    /// The feature schema captured at training time.
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// The encoder registry fitted during training.
    pub fn registry(&self) -> &EncoderRegistry {
        &self.registry
    }

    /// The underlying forest.
    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    /// The target semantics.
    pub fn target(&self) -> &TargetInfo {
        &self.target
    }

    /// A projector over this model's schema and registry.
    pub fn projector(&self) -> FeatureProjector<'_> {
        FeatureProjector::new(&self.schema, &self.registry)
    }

    /// Re-encode a full table and predict a class per row, in row order.
    ///
    /// # Errors
    ///
    /// Propagates projection failures (missing feature column, value
    /// unseen during training); no partial prediction sequence is
    /// produced.
    pub fn predict_table(&self, table: &Table) -> Result<Vec<u32>, ProjectError> {
        let matrix = self.projector().project(table)?;
        Ok(self.forest.predict(matrix.view()))
    }

    /// Predict classes for an already-projected feature matrix.
    pub fn predict_matrix(&self, features: ArrayView2<f32>) -> Vec<u32> {
        self.forest.predict(features)
    }

    /// The raw class value behind a predicted code.
    pub fn class_label(&self, code: u32) -> Option<&str> {
        self.target.classes.get(code as usize).map(String::as_str)
    }
}
