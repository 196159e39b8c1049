//! Helpers shared by unit tests.
use crate::Real;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// A reproducible sequence of values drawn uniformly from `[-10, 10)`.
pub(crate) fn random_sequence(seed: u64, len: usize) -> Vec<Real> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.random_range(-10.0..10.0)).collect()
}
