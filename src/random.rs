//! Seedable random source used by every sampler in the crate.

use rand::rngs::SmallRng;
use rand::SeedableRng;

/// The generator type threaded through a run.
pub type TourRng = SmallRng;

/// Creates a deterministic generator from `seed`.
pub fn create_rng(seed: u64) -> TourRng {
    SmallRng::seed_from_u64(seed)
}

/// Creates a generator from `seed`, or from OS entropy when `None`.
pub fn rng_from_seed(seed: Option<u64>) -> TourRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}
