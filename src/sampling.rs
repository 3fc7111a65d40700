//! Reproducible per-season subsampling of display points
//!
//! Only the scatter layer is thinned. Hot zones are always computed from the
//! full non-layup set.

use rand::SeedableRng;
use rand::seq::index;
use rand_chacha::ChaCha8Rng;

/// Number of rows kept for a season of `len` rows
pub fn sample_size(len: usize, fraction: f64) -> usize {
    let fraction = if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };
    ((fraction * len as f64).round_ties_even() as usize).min(len)
}

/// Uniform sample without replacement.
///
/// The same seed and the same input order always choose the same rows, and
/// the chosen rows keep their input order.
pub fn sample_season<T: Clone>(records: &[T], fraction: f64, seed: u64) -> Vec<T> {
    let amount = sample_size(records.len(), fraction);
    if amount == records.len() {
        return records.to_vec();
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut picked = index::sample(&mut rng, records.len(), amount).into_vec();
    picked.sort_unstable();
    picked.into_iter().map(|i| records[i].clone()).collect()
}
