//! On-disk trained-model cache.
//!
//! One artifact file per (dataset, task) key. Filesystem presence gates
//! retraining: once an artifact exists it is loaded as-is forever, even
//! if the underlying dataset changes (staleness is accepted by design;
//! delete the file to force retraining). First-time training is
//! single-flight per key, so concurrent first requests serialize instead
//! of racing to overwrite each other's artifact.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;
use tracing::{debug, info};

use crate::model::TrainedModel;
use crate::persist::{self, ArtifactError};
use crate::training::TrainError;

/// Stable identity of a cached model: dataset plus target/task name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelKey {
    /// Dataset identity (repository name).
    pub dataset: String,
    /// Target column or task name.
    pub task: String,
}

impl ModelKey {
    /// Create a key.
    pub fn new(dataset: impl Into<String>, task: impl Into<String>) -> Self {
        Self {
            dataset: dataset.into(),
            task: task.into(),
        }
    }

    /// Filesystem-safe file name for this key.
    fn file_name(&self) -> String {
        format!("{}-{}.model", sanitize(&self.dataset), sanitize(&self.task))
    }
}

impl fmt::Display for ModelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.dataset, self.task)
    }
}

/// Lowercase and replace anything outside `[a-z0-9_]` with `_`.
fn sanitize(part: &str) -> String {
    part.chars()
        .map(|c| {
            let c = c.to_ascii_lowercase();
            if c.is_ascii_alphanumeric() { c } else { '_' }
        })
        .collect()
}

/// Errors raised by cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Artifact codec or I/O failure.
    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    /// Training failed while filling a cache miss.
    #[error(transparent)]
    Train(#[from] TrainError),

    /// Cache directory could not be created.
    #[error("cannot create cache directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Filesystem-backed cache of trained model artifacts.
#[derive(Debug)]
pub struct ModelCache {
    dir: PathBuf,
    /// Per-key guards serializing first-time training.
    locks: Mutex<HashMap<ModelKey, Arc<Mutex<()>>>>,
}

impl ModelCache {
    /// Open a cache rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| CacheError::CreateDir {
            path: dir.clone(),
            source,
        })?;
        Ok(Self {
            dir,
            locks: Mutex::new(HashMap::new()),
        })
    }

    /// Path of the artifact for a key.
    pub fn path(&self, key: &ModelKey) -> PathBuf {
        self.dir.join(key.file_name())
    }

    /// Whether an artifact is persisted for this key.
    pub fn exists(&self, key: &ModelKey) -> bool {
        self.path(key).is_file()
    }

    /// Load the persisted artifact for a key.
    pub fn load(&self, key: &ModelKey) -> Result<TrainedModel, CacheError> {
        debug!(%key, "loading cached model");
        Ok(persist::read_file(self.path(key))?)
    }

    /// Persist a trained model under a key, replacing any existing
    /// artifact.
    pub fn store(&self, key: &ModelKey, model: &TrainedModel) -> Result<(), CacheError> {
        info!(%key, path = %self.path(key).display(), "storing model artifact");
        Ok(persist::write_file(model, self.path(key))?)
    }

    /// Load the model for a key, training and persisting it first if no
    /// artifact exists.
    ///
    /// The existence check and train-then-store run under a per-key lock:
    /// of two concurrent first requests, one trains while the other
    /// blocks, re-checks, and loads the freshly stored artifact.
    pub fn get_or_train<F>(&self, key: &ModelKey, train: F) -> Result<TrainedModel, CacheError>
    where
        F: FnOnce() -> Result<TrainedModel, TrainError>,
    {
        let guard = self.key_lock(key);
        let _held = guard.lock().unwrap_or_else(PoisonError::into_inner);

        if self.exists(key) {
            return self.load(key);
        }

        info!(%key, "no cached artifact, training");
        let model = train()?;
        self.store(key, &model)?;
        Ok(model)
    }

    fn key_lock(&self, key: &ModelKey) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.entry(key.clone()).or_default().clone()
    }
}

impl Clone for ModelCache {
    /// Clones share the directory but not the in-process guards; use one
    /// cache instance per process for single-flight training.
    fn clone(&self) -> Self {
        Self {
            dir: self.dir.clone(),
            locks: Mutex::new(HashMap::new()),
        }
    }
}
