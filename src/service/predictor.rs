//! Request-level prediction orchestration.

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use crate::cache::{ModelCache, ModelKey};
use crate::data::{DatasetRepository, Value};
use crate::training::ForestTrainer;

use super::error::PredictError;
use super::lifetime::mission_lifetime;
use super::record::PredictionRecord;
use super::task::{LabelRule, Strategy, TaskSpec};

/// Serves batch predictions over the registered datasets.
///
/// Owns the dataset repository, the artifact cache, and a trainer. Each
/// request re-derives predictions for every row of the task's dataset;
/// model-backed tasks train at most once per cache key.
#[derive(Debug)]
pub struct PredictionService {
    repository: DatasetRepository,
    cache: ModelCache,
    trainer: ForestTrainer,
}

impl PredictionService {
    /// Create a service with default training hyperparameters.
    pub fn new(repository: DatasetRepository, cache: ModelCache) -> Self {
        Self::with_trainer(repository, cache, ForestTrainer::default())
    }

    /// Create a service with an explicit trainer.
    pub fn with_trainer(
        repository: DatasetRepository,
        cache: ModelCache,
        trainer: ForestTrainer,
    ) -> Self {
        Self {
            repository,
            cache,
            trainer,
        }
    }

    /// The dataset repository backing this service.
    pub fn repository(&self) -> &DatasetRepository {
        &self.repository
    }

    /// Predict one record per row of the task's dataset, in row order.
    ///
    /// Derived lifetime fields are computed against today's local date.
    ///
    /// # Errors
    ///
    /// All-or-nothing: an unknown dataset, a failed training run, an
    /// unseen categorical value, or a type-invalid rule input fails the
    /// whole request with no partial output.
    pub fn predict_all(&self, task: &TaskSpec) -> Result<Vec<PredictionRecord>, PredictError> {
        self.predict_all_at(task, Local::now().date_naive())
    }

    /// [`predict_all`](Self::predict_all) with an explicit "today" for
    /// lifetime derivation. Deterministic callers and tests use this.
    pub fn predict_all_at(
        &self,
        task: &TaskSpec,
        today: NaiveDate,
    ) -> Result<Vec<PredictionRecord>, PredictError> {
        let table = self
            .repository
            .get(&task.dataset)
            .ok_or_else(|| PredictError::UnknownDataset(task.dataset.clone()))?;

        debug!(dataset = %task.dataset, rows = table.n_rows(), "prediction request");

        // For model-backed tasks the model is resolved (and the whole
        // table classified) before any record is built, so a projection
        // failure cannot leave partial output.
        let predicted = match &task.strategy {
            Strategy::ModelBacked { plan, task: name, label } => {
                let key = ModelKey::new(&task.dataset, name);
                let model = self
                    .cache
                    .get_or_train(&key, || self.trainer.train(table, plan))?;
                match label {
                    LabelRule::PredictedClass { labels } => {
                        let codes = model.predict_table(table)?;
                        Some(
                            codes
                                .into_iter()
                                .map(|code| {
                                    labels
                                        .get(code as usize)
                                        .map(String::clone)
                                        .or_else(|| model.class_label(code).map(str::to_string))
                                        .unwrap_or_else(|| code.to_string())
                                })
                                .collect::<Vec<_>>(),
                        )
                    }
                    // The artifact is materialized above; display labels
                    // come from the raw field instead.
                    LabelRule::Field(_) => None,
                }
            }
            Strategy::FieldHeuristic(_) => None,
        };

        let rule = match &task.strategy {
            Strategy::ModelBacked {
                label: LabelRule::Field(rule),
                ..
            } => Some(rule),
            Strategy::FieldHeuristic(rule) => Some(rule),
            _ => None,
        };

        let mut records = Vec::with_capacity(table.n_rows());
        for row in 0..table.n_rows() {
            let mut record = PredictionRecord::new();
            for (key, column) in &task.echo {
                let value = table.get(row, column).cloned().unwrap_or(Value::Null);
                record.push(key.clone(), value);
            }

            let label = match (&predicted, rule) {
                (Some(labels), _) => labels[row].clone(),
                (None, Some(rule)) => {
                    let value = table.get(row, rule.column());
                    rule.evaluate(value)?.to_string()
                }
                (None, None) => unreachable!("every strategy yields labels or a rule"),
            };
            record.push(task.label_key.clone(), Value::Str(label));

            if let Some(lifetime) = &task.lifetime {
                let years = table
                    .get(row, &lifetime.column)
                    .and_then(Value::as_str)
                    .and_then(|raw| mission_lifetime(raw, today));
                record.push(
                    lifetime.output_key.clone(),
                    years.map(Value::Num).unwrap_or(Value::Null),
                );
            }

            records.push(record);
        }

        Ok(records)
    }

    /// Train and persist every model-backed task that has no artifact
    /// yet. Called at startup so first requests hit warm caches.
    ///
    /// # Errors
    ///
    /// Stops at the first task whose dataset is missing or whose
    /// training fails; artifacts stored before the failure remain.
    pub fn warm_up(&self, tasks: &[TaskSpec]) -> Result<(), PredictError> {
        for task in tasks {
            let Strategy::ModelBacked { plan, task: name, .. } = &task.strategy else {
                continue;
            };
            let key = ModelKey::new(&task.dataset, name);
            if self.cache.exists(&key) {
                continue;
            }
            let table = self
                .repository
                .get(&task.dataset)
                .ok_or_else(|| PredictError::UnknownDataset(task.dataset.clone()))?;
            info!(%key, "warming model cache");
            self.cache
                .get_or_train(&key, || self.trainer.train(table, plan))?;
        }
        Ok(())
    }

    /// Launch-details view: the distinct vocabulary of the classifier's
    /// input columns plus every registered dataset's column list.
    pub fn launch_details(&self, dataset: &str) -> Result<LaunchDetails, PredictError> {
        let table = self
            .repository
            .get(dataset)
            .ok_or_else(|| PredictError::UnknownDataset(dataset.to_string()))?;
        Ok(LaunchDetails {
            launch_vehicles: table.unique_strings("Launch Vehicle")?,
            orbit_types: table.unique_strings("Orbit Type")?,
            applications: table.unique_strings("Application")?,
        })
    }

    /// Dataset-titles view: column lists per registered dataset.
    pub fn dataset_titles(&self) -> Vec<(String, Vec<String>)> {
        self.repository.titles()
    }
}

/// Vocabulary summary of the launch dataset's categorical inputs.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct LaunchDetails {
    /// Distinct launch vehicles, first-occurrence order.
    pub launch_vehicles: Vec<String>,
    /// Distinct orbit types, first-occurrence order.
    pub orbit_types: Vec<String>,
    /// Distinct applications, first-occurrence order.
    pub applications: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Table;
    use crate::training::TrainConfig;

    fn rockets_table() -> Table {
        Table::new(
            vec!["rocket_id".into(), "active".into()],
            vec![
                vec![Value::from("falcon1"), Value::from(false)],
                vec![Value::from("falcon9"), Value::from(true)],
            ],
        )
        .unwrap()
    }

    fn service_with(name: &str, table: Table) -> (tempfile::TempDir, PredictionService) {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = DatasetRepository::new();
        repo.insert(name, table);
        let cache = ModelCache::open(dir.path()).unwrap();
        let trainer = ForestTrainer::new(TrainConfig::builder().n_trees(5).build());
        let service = PredictionService::with_trainer(repo, cache, trainer);
        (dir, service)
    }

    #[test]
    fn heuristic_task_labels_from_flag() {
        let (_dir, service) = service_with("rockets", rockets_table());
        let records = service.predict_all(&TaskSpec::rockets()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("Rocket ID"), Some(&Value::from("falcon1")));
        assert_eq!(
            records[0].get("Predicted Status"),
            Some(&Value::from("Not in Service"))
        );
        assert_eq!(
            records[1].get("Predicted Status"),
            Some(&Value::from("In Service"))
        );
    }

    #[test]
    fn unknown_dataset_is_rejected() {
        let (_dir, service) = service_with("rockets", rockets_table());
        let err = service.predict_all(&TaskSpec::ships()).unwrap_err();
        assert!(matches!(err, PredictError::UnknownDataset(name) if name == "ships"));
    }

    #[test]
    fn dataset_titles_lists_columns() {
        let (_dir, service) = service_with("rockets", rockets_table());
        let titles = service.dataset_titles();
        assert_eq!(titles, vec![("rockets".into(), vec!["rocket_id".into(), "active".into()])]);
    }
}
