//! Seeded random number generation.

use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Creates a fast, seedable RNG.
pub fn create_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// SplitMix64 finalizer, used to derive well-spread per-worker seeds from
/// one base seed.
#[inline]
pub fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
    x = (x ^ (x >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^ (x >> 31)
}

/// Seed for worker `worker_id` of a run started with `base_seed`.
#[inline]
pub fn worker_seed(base_seed: u64, worker_id: usize) -> u64 {
    splitmix64(base_seed ^ worker_id as u64)
}
