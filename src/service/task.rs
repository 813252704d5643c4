//! Prediction task definitions.
//!
//! A [`TaskSpec`] is the declarative shape of one prediction endpoint:
//! which dataset it reads, how the label is produced, which identifying
//! columns are echoed into each output record, and any derived fields.
//! The seven built-in constructors mirror the source system's endpoints.

use crate::training::{FeatureSelection, TargetSpec, TrainPlan};

use super::rules::FieldRule;

/// How a predicted class code becomes a display label.
#[derive(Debug, Clone, PartialEq)]
pub enum LabelRule {
    /// Index `labels` by the predicted class code. Codes beyond the list
    /// fall back to the model's own class vocabulary.
    PredictedClass { labels: Vec<String> },

    /// Ignore the model output for display and label from a raw field.
    /// The model is still trained and cached so the artifact exists and
    /// the training pipeline is exercised.
    Field(FieldRule),
}

/// How a task produces its labels.
#[derive(Debug, Clone, PartialEq)]
pub enum Strategy {
    /// Train (or load) a forest for this dataset and task, then label
    /// each row per `label`.
    ModelBacked {
        plan: TrainPlan,
        /// Task name half of the cache key.
        task: String,
        label: LabelRule,
    },

    /// No model at all; the label comes straight from a field rule.
    FieldHeuristic(FieldRule),
}

/// A derived elapsed-years field appended to each record.
#[derive(Debug, Clone, PartialEq)]
pub struct LifetimeField {
    /// Source column holding the raw date string.
    pub column: String,
    /// Output key of the derived field.
    pub output_key: String,
}

/// Declarative description of one prediction task.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskSpec {
    /// Dataset name in the repository.
    pub dataset: String,
    /// Label production strategy.
    pub strategy: Strategy,
    /// `(output key, source column)` pairs echoed into every record.
    pub echo: Vec<(String, String)>,
    /// Output key of the label field.
    pub label_key: String,
    /// Optional derived lifetime field.
    pub lifetime: Option<LifetimeField>,
}

fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(k, c)| (k.to_string(), c.to_string()))
        .collect()
}

impl TaskSpec {
    /// Launch success prediction over the ISRO launch dataset.
    ///
    /// Trains on the categorical vehicle/orbit/application columns with a
    /// binary target derived from whether the remarks mention success.
    pub fn isro_launches() -> Self {
        Self {
            dataset: "isro_launches".into(),
            strategy: Strategy::ModelBacked {
                plan: TrainPlan {
                    target: TargetSpec::TextContains {
                        column: "Remarks".into(),
                        needle: "successful".into(),
                    },
                    features: FeatureSelection::Categorical(vec![
                        "Launch Vehicle".into(),
                        "Orbit Type".into(),
                        "Application".into(),
                    ]),
                },
                task: "success".into(),
                label: LabelRule::PredictedClass {
                    labels: vec!["Launch unsuccessful".into(), "Launch successful".into()],
                },
            },
            echo: pairs(&[
                ("Launch Vehicle", "Launch Vehicle"),
                ("Launch Date", "Launch Date"),
                ("Orbit Type", "Orbit Type"),
                ("Application", "Application"),
            ]),
            label_key: "Predicted Success".into(),
            lifetime: Some(LifetimeField {
                column: "Launch Date".into(),
                output_key: "Mission Lifetime (years)".into(),
            }),
        }
    }

    /// Capsule reusability over the capsules dataset.
    pub fn capsules() -> Self {
        Self {
            dataset: "capsules".into(),
            strategy: Strategy::ModelBacked {
                plan: TrainPlan {
                    target: TargetSpec::Column("status".into()),
                    features: FeatureSelection::AllButTarget,
                },
                task: "status".into(),
                label: LabelRule::Field(FieldRule::Equals {
                    column: "status".into(),
                    expected: "active".into(),
                    then_label: "Reusable".into(),
                    else_label: "Retired".into(),
                }),
            },
            echo: pairs(&[("Capsule ID", "capsule_id")]),
            label_key: "Predicted Status".into(),
            lifetime: None,
        }
    }

    /// Core operational status over the cores dataset.
    pub fn cores() -> Self {
        Self {
            dataset: "cores".into(),
            strategy: Strategy::ModelBacked {
                plan: TrainPlan {
                    target: TargetSpec::Column("status".into()),
                    features: FeatureSelection::AllButTarget,
                },
                task: "status".into(),
                label: LabelRule::Field(FieldRule::Equals {
                    column: "status".into(),
                    expected: "active".into(),
                    then_label: "Operational".into(),
                    else_label: "Decommissioned".into(),
                }),
            },
            echo: pairs(&[("Core ID", "core_id")]),
            label_key: "Predicted Status".into(),
            lifetime: None,
        }
    }

    /// Commercial-versus-government application over the launch dataset.
    ///
    /// The application field must be textual; a non-text value fails the
    /// whole request.
    pub fn launch_applications() -> Self {
        Self {
            dataset: "isro_launches".into(),
            strategy: Strategy::ModelBacked {
                plan: TrainPlan {
                    target: TargetSpec::Column("Application".into()),
                    features: FeatureSelection::AllButTarget,
                },
                task: "application".into(),
                label: LabelRule::Field(FieldRule::ContainsText {
                    column: "Application".into(),
                    needle: "Commercial".into(),
                    then_label: "Commercial".into(),
                    else_label: "Government".into(),
                }),
            },
            echo: pairs(&[("Launch Vehicle", "Launch Vehicle")]),
            label_key: "Predicted Application".into(),
            lifetime: None,
        }
    }

    /// Payload kind over the payloads dataset. Pure field heuristic.
    pub fn payloads() -> Self {
        Self {
            dataset: "payloads".into(),
            strategy: Strategy::FieldHeuristic(FieldRule::Equals {
                column: "type".into(),
                expected: "Satellite".into(),
                then_label: "Satellite".into(),
                else_label: "Other".into(),
            }),
            echo: pairs(&[("Payload ID", "payload_id")]),
            label_key: "Predicted Type".into(),
            lifetime: None,
        }
    }

    /// Rocket service status over the rockets dataset. Pure field
    /// heuristic on the active flag.
    pub fn rockets() -> Self {
        Self {
            dataset: "rockets".into(),
            strategy: Strategy::FieldHeuristic(FieldRule::Flag {
                column: "active".into(),
                then_label: "In Service".into(),
                else_label: "Not in Service".into(),
            }),
            echo: pairs(&[("Rocket ID", "rocket_id")]),
            label_key: "Predicted Status".into(),
            lifetime: None,
        }
    }

    /// Ship operational status over the ships dataset. Pure field
    /// heuristic on the active flag.
    pub fn ships() -> Self {
        Self {
            dataset: "ships".into(),
            strategy: Strategy::FieldHeuristic(FieldRule::Flag {
                column: "active".into(),
                then_label: "Operational".into(),
                else_label: "Inactive".into(),
            }),
            echo: pairs(&[("Ship ID", "ship_id")]),
            label_key: "Predicted Status".into(),
            lifetime: None,
        }
    }

    /// All seven built-in tasks.
    pub fn builtin() -> Vec<Self> {
        vec![
            Self::isro_launches(),
            Self::capsules(),
            Self::cores(),
            Self::launch_applications(),
            Self::payloads(),
            Self::rockets(),
            Self::ships(),
        ]
    }
}
