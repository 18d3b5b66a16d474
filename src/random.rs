//! Seeded RNG construction shared by the engine and the operator tests.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a deterministic RNG from a seed.
///
/// Two runs with the same seed and the same configuration walk through an
/// identical random stream, which makes results reproducible.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
