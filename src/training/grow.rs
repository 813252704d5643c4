//! CART tree growing with Gini impurity.

use std::cmp::Ordering;

use ndarray::ArrayView2;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::forest::{DecisionTree, TreeBuilder};

/// Node-level stopping and sampling settings, derived from
/// [`TrainConfig`](super::TrainConfig) by the trainer.
#[derive(Debug, Clone, Copy)]
pub(crate) struct GrowSettings {
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    /// Number of candidate features examined per split.
    pub max_features: usize,
}

/// Grow one decision tree over the given sample indices.
///
/// `x` is `[n_rows, n_features]`; `indices` selects the (possibly
/// bootstrap-repeated) rows this tree trains on. Splits are binary
/// numeric comparisons; samples with a missing feature value go left,
/// matching traversal at inference time.
pub(crate) fn grow_tree(
    x: ArrayView2<f32>,
    y: &[u32],
    n_classes: u32,
    indices: &[usize],
    settings: GrowSettings,
    rng: &mut StdRng,
) -> DecisionTree {
    let mut builder = TreeBuilder::new();
    let mut features: Vec<u32> = (0..x.ncols() as u32).collect();
    grow_node(
        &mut builder,
        x,
        y,
        n_classes,
        indices.to_vec(),
        0,
        settings,
        &mut features,
        rng,
    );
    builder.finish()
}

#[allow(clippy::too_many_arguments)]
fn grow_node(
    builder: &mut TreeBuilder,
    x: ArrayView2<f32>,
    y: &[u32],
    n_classes: u32,
    indices: Vec<usize>,
    depth: usize,
    settings: GrowSettings,
    features: &mut Vec<u32>,
    rng: &mut StdRng,
) -> u32 {
    let counts = class_counts(y, &indices, n_classes);
    let majority = argmax(&counts);

    let depth_reached = settings.max_depth.is_some_and(|d| depth >= d);
    let pure = counts.iter().filter(|&&c| c > 0).count() <= 1;
    if pure || depth_reached || indices.len() < settings.min_samples_split {
        return builder.add_leaf(majority);
    }

    // Random feature subset per split, fresh shuffle each node.
    features.shuffle(rng);
    let parent_impurity = gini(&counts, indices.len());
    let mut best: Option<Split> = None;
    for &feature in features.iter().take(settings.max_features) {
        if let Some(split) = best_split_on(x, y, n_classes, &indices, feature) {
            if best.as_ref().map_or(true, |b| split.impurity < b.impurity) {
                best = Some(split);
            }
        }
    }

    let split = match best {
        Some(s) if parent_impurity - s.impurity > 1e-7 => s,
        _ => return builder.add_leaf(majority),
    };

    // Partition with the exact rule traversal uses: !(v >= threshold)
    // goes left, so NaN lands left.
    let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
        .into_iter()
        .partition(|&i| !(x[[i, split.feature as usize]] >= split.threshold));
    // Midpoints of adjacent floats can round onto the left value, which
    // empties one side under the >= rule; stop at a leaf instead.
    if left_idx.is_empty() || right_idx.is_empty() {
        return builder.add_leaf(majority);
    }

    let node = builder.add_split(split.feature, split.threshold);
    let left = grow_node(
        builder, x, y, n_classes, left_idx, depth + 1, settings, features, rng,
    );
    let right = grow_node(
        builder, x, y, n_classes, right_idx, depth + 1, settings, features, rng,
    );
    builder.set_children(node, left, right);
    node
}

/// A candidate split and the weighted Gini impurity of its children.
struct Split {
    feature: u32,
    threshold: f32,
    impurity: f64,
}

/// Best threshold for one feature over the given rows, or `None` when the
/// feature is constant (or all-missing) on them.
fn best_split_on(
    x: ArrayView2<f32>,
    y: &[u32],
    n_classes: u32,
    indices: &[usize],
    feature: u32,
) -> Option<Split> {
    let mut pairs: Vec<(f32, u32)> = indices
        .iter()
        .map(|&i| (x[[i, feature as usize]], y[i]))
        .collect();
    // Missing values sort first so every candidate keeps them left.
    pairs.sort_by(|a, b| {
        nan_low(a.0)
            .partial_cmp(&nan_low(b.0))
            .unwrap_or(Ordering::Equal)
    });

    let n = pairs.len();
    let mut right_counts = vec![0usize; n_classes as usize];
    for &(_, class) in &pairs {
        right_counts[class as usize] += 1;
    }
    let mut left_counts = vec![0usize; n_classes as usize];

    let mut best: Option<Split> = None;
    for k in 1..n {
        let (prev_value, prev_class) = pairs[k - 1];
        left_counts[prev_class as usize] += 1;
        right_counts[prev_class as usize] -= 1;

        let value = pairs[k].0;
        if value.is_nan() {
            continue;
        }
        // Split between distinct neighbours; when the left neighbour is
        // missing, the smallest real value itself separates NaN from rest.
        let threshold = if prev_value.is_nan() {
            value
        } else if prev_value < value {
            (prev_value + value) / 2.0
        } else {
            continue;
        };

        let impurity = (gini(&left_counts, k) * k as f64
            + gini(&right_counts, n - k) * (n - k) as f64)
            / n as f64;
        if best.as_ref().map_or(true, |b| impurity < b.impurity) {
            best = Some(Split {
                feature,
                threshold,
                impurity,
            });
        }
    }
    best
}

fn class_counts(y: &[u32], indices: &[usize], n_classes: u32) -> Vec<usize> {
    let mut counts = vec![0usize; n_classes as usize];
    for &i in indices {
        counts[y[i] as usize] += 1;
    }
    counts
}

/// Gini impurity of a count vector: `1 - Σ p_i²`.
fn gini(counts: &[usize], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    1.0 - counts
        .iter()
        .map(|&c| {
            let p = c as f64 / total;
            p * p
        })
        .sum::<f64>()
}

fn argmax(counts: &[usize]) -> u32 {
    let mut best = 0usize;
    for (i, &c) in counts.iter().enumerate().skip(1) {
        if c > counts[best] {
            best = i;
        }
    }
    best as u32
}

fn nan_low(v: f32) -> f32 {
    if v.is_nan() {
        f32::NEG_INFINITY
    } else {
        v
    }
}
