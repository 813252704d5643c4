//! Seeded train/held-out row partitioning.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Split `0..n_rows` into (train, held-out) index sets.
///
/// The shuffle is driven by a seeded [`StdRng`], so identical `n_rows`,
/// `test_fraction`, and `seed` reproduce the same partition. The held-out
/// set gets `ceil(n_rows * test_fraction)` rows, clamped so both sides
/// stay non-empty whenever `n_rows >= 2`.
pub fn train_test_split(n_rows: usize, test_fraction: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    if n_rows < 2 || test_fraction <= 0.0 {
        return ((0..n_rows).collect(), Vec::new());
    }

    let mut indices: Vec<usize> = (0..n_rows).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let n_test = ((n_rows as f64) * test_fraction).ceil() as usize;
    let n_test = n_test.clamp(1, n_rows - 1);

    let train = indices.split_off(n_test);
    (train, indices)
}
