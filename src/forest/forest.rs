//! Majority-vote forest over decision trees.

use ndarray::ArrayView2;

use super::tree::DecisionTree;

/// A trained tree-ensemble classifier.
///
/// Each tree votes for a class; the forest prediction is the class with
/// the most votes, ties broken toward the lower class code so repeated
/// runs over the same trees are deterministic.
#[derive(Debug, Clone)]
pub struct Forest {
    trees: Vec<DecisionTree>,
    n_classes: u32,
}

impl Forest {
    /// Create an empty forest for `n_classes` target classes.
    pub fn new(n_classes: u32) -> Self {
        Self {
            trees: Vec::new(),
            n_classes,
        }
    }

    /// Append a trained tree.
    pub fn push_tree(&mut self, tree: DecisionTree) {
        self.trees.push(tree);
    }

    /// Number of trees.
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Number of target classes.
    pub fn n_classes(&self) -> u32 {
        self.n_classes
    }

    /// Trees in vote order (for persistence).
    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }

    /// Predict the class of a single feature vector.
    pub fn predict_row(&self, features: &[f32]) -> u32 {
        let mut votes = vec![0u32; self.n_classes as usize];
        for tree in &self.trees {
            let class = tree.predict_row(features);
            votes[class as usize] += 1;
        }
        argmax(&votes)
    }

    /// Predict classes for a `[n_rows, n_features]` matrix, row by row,
    /// preserving row order.
    pub fn predict(&self, features: ArrayView2<f32>) -> Vec<u32> {
        features
            .rows()
            .into_iter()
            .map(|row| {
                // Rows of an owned Array2 are contiguous.
                match row.as_slice() {
                    Some(slice) => self.predict_row(slice),
                    None => self.predict_row(&row.to_vec()),
                }
            })
            .collect()
    }
}

/// Index of the largest vote count; ties go to the lowest index.
fn argmax(votes: &[u32]) -> u32 {
    let mut best = 0usize;
    for (i, &v) in votes.iter().enumerate().skip(1) {
        if v > votes[best] {
            best = i;
        }
    }
    best as u32
}
