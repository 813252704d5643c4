//! Random-forest trainer.

use ndarray::ArrayView2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::data::Table;
use crate::encoding::EncoderRegistry;
use crate::features::{FeatureProjector, FeatureSchema};
use crate::forest::{DecisionTree, Forest};
use crate::model::{TargetInfo, TrainedModel};

use super::config::TrainConfig;
use super::error::TrainError;
use super::grow::{grow_tree, GrowSettings};
use super::split::train_test_split;
use super::target::TargetSpec;

/// Which columns feed the classifier.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureSelection {
    /// Every column except the target, with kinds sniffed from the data.
    AllButTarget,
    /// A fixed column list, every column coerced to a category string.
    Categorical(Vec<String>),
}

/// One training task: target derivation plus feature selection.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainPlan {
    /// How the target vector is derived.
    pub target: TargetSpec,
    /// Which columns become features.
    pub features: FeatureSelection,
}

/// Fits a tree-ensemble classifier against encoded features.
///
/// One trainer instance is reusable across datasets; encoders and
/// schemas are scoped to each training run, never shared between models.
#[derive(Debug, Clone, Default)]
pub struct ForestTrainer {
    config: TrainConfig,
}

impl ForestTrainer {
    /// Create a trainer with the given hyperparameters.
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// The training configuration.
    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    /// Train a model: encode categorical features, derive the target,
    /// split 80/20 with the configured seed, and grow the forest on the
    /// training partition only.
    ///
    /// Held-out accuracy is computed and logged but not surfaced.
    ///
    /// # Errors
    ///
    /// [`TrainError::EmptyDataset`] on zero rows,
    /// [`TrainError::SingleClass`] when the target has fewer than two
    /// classes, plus column-lookup and projection failures.
    pub fn train(&self, table: &Table, plan: &TrainPlan) -> Result<TrainedModel, TrainError> {
        if table.n_rows() == 0 {
            return Err(TrainError::EmptyDataset);
        }

        let schema = match &plan.features {
            FeatureSelection::AllButTarget => FeatureSchema::infer(table, plan.target.column())?,
            FeatureSelection::Categorical(columns) => {
                let refs: Vec<&str> = columns.iter().map(String::as_str).collect();
                FeatureSchema::categorical(&refs)
            }
        };
        let registry = EncoderRegistry::fit(table, &schema.categorical_columns());
        let features = FeatureProjector::new(&schema, &registry).project(table)?;

        let target = plan.target.derive(table)?;
        let n_classes = target.classes.len().max(
            target.labels.iter().map(|&l| l as usize + 1).max().unwrap_or(0),
        ) as u32;

        let (train_idx, test_idx) =
            train_test_split(table.n_rows(), self.config.test_fraction, self.config.seed);

        info!(
            n_rows = table.n_rows(),
            n_features = schema.n_features(),
            n_classes,
            n_trees = self.config.n_trees,
            "training forest"
        );

        let settings = GrowSettings {
            max_depth: self.config.max_depth,
            min_samples_split: self.config.min_samples_split,
            max_features: max_features_for(schema.n_features()),
        };

        // Per-tree RNGs are derived from the tree index, so the forest is
        // reproducible regardless of rayon's scheduling.
        let trees: Vec<DecisionTree> = (0..self.config.n_trees)
            .into_par_iter()
            .map(|t| {
                let mut rng = StdRng::seed_from_u64(tree_seed(self.config.seed, t));
                let sample = bootstrap(&train_idx, &mut rng);
                grow_tree(
                    features.view(),
                    &target.labels,
                    n_classes,
                    &sample,
                    settings,
                    &mut rng,
                )
            })
            .collect();

        let mut forest = Forest::new(n_classes);
        for tree in trees {
            forest.push_tree(tree);
        }

        if !test_idx.is_empty() {
            let accuracy = holdout_accuracy(&forest, features.view(), &target.labels, &test_idx);
            debug!(accuracy, held_out = test_idx.len(), "held-out evaluation");
        }

        Ok(TrainedModel::from_parts(
            schema,
            registry,
            forest,
            TargetInfo {
                spec: plan.target.clone(),
                classes: target.classes,
            },
        ))
    }
}

/// sqrt(n_features), the reference classifier's per-split budget.
fn max_features_for(n_features: usize) -> usize {
    ((n_features as f64).sqrt().floor() as usize).max(1)
}

fn tree_seed(seed: u64, tree_index: usize) -> u64 {
    seed ^ (tree_index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Sample row indices with replacement, one draw per training row.
fn bootstrap(train_idx: &[usize], rng: &mut StdRng) -> Vec<usize> {
    (0..train_idx.len())
        .map(|_| train_idx[rng.gen_range(0..train_idx.len())])
        .collect()
}

fn holdout_accuracy(
    forest: &Forest,
    features: ArrayView2<f32>,
    labels: &[u32],
    test_idx: &[usize],
) -> f64 {
    let correct = test_idx
        .iter()
        .filter(|&&i| forest.predict_row(&features.row(i).to_vec()) == labels[i])
        .count();
    correct as f64 / test_idx.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Value;
    use crate::features::FeatureKind;

    /// 40 rows where every feature column separates the two outcomes, so
    /// any per-split feature sample recovers the label exactly.
    fn isro_like_table() -> Table {
        let mut rows = Vec::new();
        for i in 0..40 {
            let (vehicle, orbit, application, remark) = if i % 2 == 0 {
                ("PSLV", "LEO", "Communication", "Launch successful")
            } else {
                ("GSLV", "GTO", "Navigation", "Launch failed")
            };
            rows.push(vec![
                Value::from(vehicle),
                Value::from(orbit),
                Value::from(application),
                Value::from(remark),
            ]);
        }
        Table::new(
            vec![
                "Launch Vehicle".into(),
                "Orbit Type".into(),
                "Application".into(),
                "Remarks".into(),
            ],
            rows,
        )
        .unwrap()
    }

    fn isro_plan() -> TrainPlan {
        TrainPlan {
            target: TargetSpec::TextContains {
                column: "Remarks".into(),
                needle: "successful".into(),
            },
            features: FeatureSelection::Categorical(vec![
                "Launch Vehicle".into(),
                "Orbit Type".into(),
                "Application".into(),
            ]),
        }
    }

    #[test]
    fn trains_and_predicts_the_training_table() {
        let table = isro_like_table();
        let trainer = ForestTrainer::new(TrainConfig::builder().n_trees(15).build());
        let model = trainer.train(&table, &isro_plan()).unwrap();

        assert_eq!(model.forest().n_trees(), 15);
        assert_eq!(model.schema().n_features(), 3);
        assert!(model
            .schema()
            .iter()
            .all(|m| m.kind == FeatureKind::Categorical));

        let predictions = model.predict_table(&table).unwrap();
        assert_eq!(predictions.len(), 40);
        // Each feature fully determines the label; the forest recovers it.
        for (i, &p) in predictions.iter().enumerate() {
            let expected = u32::from(i % 2 == 0);
            assert_eq!(p, expected, "row {i}");
        }
    }

    #[test]
    fn same_seed_reproduces_identical_predictions() {
        let table = isro_like_table();
        let trainer = ForestTrainer::new(TrainConfig::builder().n_trees(10).build());
        let a = trainer.train(&table, &isro_plan()).unwrap();
        let b = trainer.train(&table, &isro_plan()).unwrap();
        assert_eq!(
            a.predict_table(&table).unwrap(),
            b.predict_table(&table).unwrap()
        );
    }

    #[test]
    fn column_target_with_inferred_features() {
        let table = Table::new(
            vec!["capsule_id".into(), "landings".into(), "status".into()],
            vec![
                vec![Value::from("C101"), Value::from(0.0), Value::from("retired")],
                vec![Value::from("C102"), Value::from(1.0), Value::from("active")],
                vec![Value::from("C103"), Value::from(2.0), Value::from("active")],
                vec![Value::from("C104"), Value::from(0.0), Value::from("retired")],
                vec![Value::from("C105"), Value::from(3.0), Value::from("active")],
            ],
        )
        .unwrap();

        let plan = TrainPlan {
            target: TargetSpec::Column("status".into()),
            features: FeatureSelection::AllButTarget,
        };
        let trainer = ForestTrainer::new(TrainConfig::builder().n_trees(5).build());
        let model = trainer.train(&table, &plan).unwrap();

        assert_eq!(model.target().classes, vec!["retired", "active"]);
        assert_eq!(model.schema().n_features(), 2);
    }

    #[test]
    fn empty_table_fails() {
        let table = Table::new(vec!["status".into()], vec![]).unwrap();
        let trainer = ForestTrainer::default();
        let plan = TrainPlan {
            target: TargetSpec::Column("status".into()),
            features: FeatureSelection::AllButTarget,
        };
        assert!(matches!(
            trainer.train(&table, &plan),
            Err(TrainError::EmptyDataset)
        ));
    }

    #[test]
    fn single_class_fails() {
        let table = Table::new(
            vec!["id".into(), "status".into()],
            vec![
                vec![Value::from("a"), Value::from("active")],
                vec![Value::from("b"), Value::from("active")],
            ],
        )
        .unwrap();
        let trainer = ForestTrainer::default();
        let plan = TrainPlan {
            target: TargetSpec::Column("status".into()),
            features: FeatureSelection::AllButTarget,
        };
        assert!(matches!(
            trainer.train(&table, &plan),
            Err(TrainError::SingleClass { classes: 1 })
        ));
    }
}
