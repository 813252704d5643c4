//! Training configuration.

use bon::Builder;

/// Hyperparameters for random-forest training.
///
/// Defaults mirror the reference classifier: 100 unconstrained trees,
/// an 80/20 train/held-out split, and a fixed seed for reproducibility.
///
/// # Example
///
/// ```
/// use launchcast::training::TrainConfig;
///
/// let config = TrainConfig::builder().n_trees(50).seed(7).build();
/// assert_eq!(config.n_trees, 50);
/// assert_eq!(config.test_fraction, 0.2);
/// ```
#[derive(Debug, Clone, Builder)]
pub struct TrainConfig {
    /// Number of trees in the ensemble.
    #[builder(default = 100)]
    pub n_trees: usize,

    /// Maximum tree depth; `None` grows until leaves are pure.
    pub max_depth: Option<usize>,

    /// Minimum samples required to split a node.
    #[builder(default = 2)]
    pub min_samples_split: usize,

    /// Fraction of rows held out from training.
    #[builder(default = 0.2)]
    pub test_fraction: f64,

    /// Seed for the split shuffle, bootstrap sampling, and feature
    /// subsampling. Identical input plus identical seed reproduces the
    /// trained model exactly.
    #[builder(default = 42)]
    pub seed: u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_classifier() {
        let config = TrainConfig::default();
        assert_eq!(config.n_trees, 100);
        assert_eq!(config.max_depth, None);
        assert_eq!(config.min_samples_split, 2);
        assert_eq!(config.seed, 42);
    }
}
