//! Payload structures for the native artifact format.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::encoding::{EncoderRegistry, LabelEncoder};
use crate::features::{FeatureKind, FeatureMeta, FeatureSchema};
use crate::forest::{DecisionTree, Forest};
use crate::model::{TargetInfo, TrainedModel};
use crate::training::TargetSpec;

/// Errors while serializing or deserializing a model artifact.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// Postcard encode/decode failure.
    #[error("artifact codec error: {0}")]
    Codec(#[from] postcard::Error),

    /// Underlying I/O error.
    #[error("artifact I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The payload decoded but violates a structural invariant.
    #[error("malformed artifact: {0}")]
    Malformed(String),
}

// ============================================================================
// Top-Level Payload
// ============================================================================

/// Version-tagged payload enum for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Payload {
    /// Version 1 format.
    V1(ModelPayload),
}

/// Complete trained-model payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelPayload {
    /// Ordered feature schema.
    pub schema: SchemaPayload,
    /// Per-column encoder class lists, `(column, classes)` pairs.
    pub encoders: Vec<(String, Vec<String>)>,
    /// Forest trees.
    pub trees: Vec<TreePayload>,
    /// Number of target classes.
    pub n_classes: u32,
    /// Target semantics.
    pub target: TargetPayload,
}

/// Ordered feature list: `(name, is_categorical)` pairs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaPayload {
    pub features: Vec<(String, bool)>,
}

/// Single decision tree as parallel arrays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreePayload {
    pub split_features: Vec<u32>,
    pub thresholds: Vec<f32>,
    pub left_children: Vec<u32>,
    pub right_children: Vec<u32>,
    pub is_leaf: Vec<bool>,
    pub leaf_classes: Vec<u32>,
}

/// Target semantics bound into the artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TargetPayload {
    /// Label-encoded raw column.
    Column { column: String, classes: Vec<String> },
    /// Binary textual predicate.
    TextContains {
        column: String,
        needle: String,
        classes: Vec<String>,
    },
}

// ============================================================================
// Conversions
// ============================================================================

impl ModelPayload {
    /// Snapshot a runtime model into its storage shape.
    pub fn from_model(model: &TrainedModel) -> Self {
        let schema = SchemaPayload {
            features: model
                .schema()
                .iter()
                .map(|m| (m.name.clone(), m.kind.is_categorical()))
                .collect(),
        };
        let encoders = model
            .registry()
            .iter()
            .map(|(column, enc)| (column.to_string(), enc.classes().to_vec()))
            .collect();
        let trees = model
            .forest()
            .trees()
            .iter()
            .map(|tree| {
                let (sf, th, lc, rc, il, cls) = tree.arrays();
                TreePayload {
                    split_features: sf.to_vec(),
                    thresholds: th.to_vec(),
                    left_children: lc.to_vec(),
                    right_children: rc.to_vec(),
                    is_leaf: il.to_vec(),
                    leaf_classes: cls.to_vec(),
                }
            })
            .collect();
        let target = match &model.target().spec {
            TargetSpec::Column(column) => TargetPayload::Column {
                column: column.clone(),
                classes: model.target().classes.clone(),
            },
            TargetSpec::TextContains { column, needle } => TargetPayload::TextContains {
                column: column.clone(),
                needle: needle.clone(),
                classes: model.target().classes.clone(),
            },
        };

        Self {
            schema,
            encoders,
            trees,
            n_classes: model.forest().n_classes(),
            target,
        }
    }

    /// Rebuild the runtime model from its storage shape.
    pub fn into_model(self) -> Result<TrainedModel, ArtifactError> {
        let features = self
            .schema
            .features
            .into_iter()
            .map(|(name, categorical)| FeatureMeta {
                name,
                kind: if categorical {
                    FeatureKind::Categorical
                } else {
                    FeatureKind::Numeric
                },
            })
            .collect();
        let schema = FeatureSchema::from_features(features);

        let mut registry = EncoderRegistry::new();
        for (column, classes) in self.encoders {
            registry.insert(column, LabelEncoder::from_classes(classes));
        }

        let n_features = schema.n_features();
        let mut forest = Forest::new(self.n_classes);
        for tree in self.trees {
            let n = tree.is_leaf.len();
            if tree.split_features.len() != n
                || tree.thresholds.len() != n
                || tree.left_children.len() != n
                || tree.right_children.len() != n
                || tree.leaf_classes.len() != n
            {
                return Err(ArtifactError::Malformed(
                    "tree arrays have mismatched lengths".to_string(),
                ));
            }
            // Traversal indexes these arrays unchecked, so a decodable
            // artifact must also be structurally sound.
            for i in 0..n {
                if tree.is_leaf[i] {
                    if tree.leaf_classes[i] >= self.n_classes {
                        return Err(ArtifactError::Malformed(format!(
                            "leaf class {} out of range for {} classes",
                            tree.leaf_classes[i], self.n_classes
                        )));
                    }
                } else {
                    if tree.left_children[i] as usize >= n
                        || tree.right_children[i] as usize >= n
                    {
                        return Err(ArtifactError::Malformed(format!(
                            "child link out of range at node {i}"
                        )));
                    }
                    if tree.split_features[i] as usize >= n_features {
                        return Err(ArtifactError::Malformed(format!(
                            "split feature {} out of range for {} features",
                            tree.split_features[i], n_features
                        )));
                    }
                }
            }
            forest.push_tree(DecisionTree::from_arrays(
                tree.split_features,
                tree.thresholds,
                tree.left_children,
                tree.right_children,
                tree.is_leaf,
                tree.leaf_classes,
            ));
        }

        let (spec, classes) = match self.target {
            TargetPayload::Column { column, classes } => (TargetSpec::Column(column), classes),
            TargetPayload::TextContains {
                column,
                needle,
                classes,
            } => (TargetSpec::TextContains { column, needle }, classes),
        };

        Ok(TrainedModel::from_parts(
            schema,
            registry,
            forest,
            TargetInfo { spec, classes },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Table, Value};
    use crate::training::{FeatureSelection, ForestTrainer, TrainConfig, TrainPlan};

    fn trained() -> (Table, TrainedModel) {
        let table = Table::new(
            vec!["orbit".into(), "mass".into(), "status".into()],
            vec![
                vec![Value::from("LEO"), Value::from(10.0), Value::from("ok")],
                vec![Value::from("GTO"), Value::from(20.0), Value::from("lost")],
                vec![Value::from("LEO"), Value::from(12.0), Value::from("ok")],
                vec![Value::from("GTO"), Value::from(25.0), Value::from("lost")],
                vec![Value::from("LEO"), Value::from(11.0), Value::from("ok")],
            ],
        )
        .unwrap();
        let plan = TrainPlan {
            target: TargetSpec::Column("status".into()),
            features: FeatureSelection::AllButTarget,
        };
        let trainer = ForestTrainer::new(TrainConfig::builder().n_trees(7).build());
        let model = trainer.train(&table, &plan).unwrap();
        (table, model)
    }

    #[test]
    fn round_trip_preserves_predictions() {
        let (table, model) = trained();
        let bytes = crate::persist::to_bytes(&model).unwrap();
        let loaded = crate::persist::from_bytes(&bytes).unwrap();

        assert_eq!(
            model.predict_table(&table).unwrap(),
            loaded.predict_table(&table).unwrap()
        );
        assert_eq!(loaded.target().classes, model.target().classes);
        assert_eq!(loaded.schema(), model.schema());
        assert_eq!(loaded.registry(), model.registry());
    }

    #[test]
    fn mismatched_tree_arrays_are_rejected() {
        let (_, model) = trained();
        let mut payload = ModelPayload::from_model(&model);
        payload.trees[0].thresholds.pop();
        assert!(matches!(
            payload.into_model(),
            Err(ArtifactError::Malformed(_))
        ));
    }

    /// A stump whose arrays decode fine but can be corrupted per field.
    fn stump_payload() -> TreePayload {
        TreePayload {
            split_features: vec![0, 0, 0],
            thresholds: vec![0.5, 0.0, 0.0],
            left_children: vec![1, 0, 0],
            right_children: vec![2, 0, 0],
            is_leaf: vec![false, true, true],
            leaf_classes: vec![0, 0, 1],
        }
    }

    #[test]
    fn out_of_range_child_link_is_rejected() {
        let (_, model) = trained();
        let mut payload = ModelPayload::from_model(&model);
        let mut tree = stump_payload();
        tree.right_children[0] = 9;
        payload.trees = vec![tree];
        assert!(matches!(
            payload.into_model(),
            Err(ArtifactError::Malformed(_))
        ));
    }

    #[test]
    fn out_of_range_leaf_class_is_rejected() {
        let (_, model) = trained();
        let mut payload = ModelPayload::from_model(&model);
        let mut tree = stump_payload();
        tree.leaf_classes[2] = 99;
        payload.trees = vec![tree];
        assert!(matches!(
            payload.into_model(),
            Err(ArtifactError::Malformed(_))
        ));
    }

    #[test]
    fn out_of_range_split_feature_is_rejected() {
        let (_, model) = trained();
        let mut payload = ModelPayload::from_model(&model);
        let mut tree = stump_payload();
        tree.split_features[0] = 40;
        payload.trees = vec![tree];
        assert!(matches!(
            payload.into_model(),
            Err(ArtifactError::Malformed(_))
        ));
    }
}
