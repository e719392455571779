use crate::spins;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

/// Mutable state of one independent replica: its spin configuration and the
/// generator that drives it.
///
/// The spins are only ever mutated through `&mut` borrows handed to the
/// cluster update, so a replica has a single writer by construction.
pub struct Replica {
    /// Spin configuration, one ±1 entry per site.
    pub spins: Vec<i8>,
    pub rng: Xoshiro256StarStar,
}

impl Replica {
    /// Random ±1 spins drawn from a generator seeded with `seed`.
    pub fn new(n_spins: usize, seed: u64) -> Self {
        let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
        let spins = spins::random_spins(n_spins, &mut rng);
        Self { spins, rng }
    }

    /// Replicas `base_seed, base_seed + 1, …`, wrapping at `u64::MAX`.
    pub fn seeded(n_replicas: usize, n_spins: usize, base_seed: u64) -> Vec<Self> {
        (0..n_replicas)
            .map(|r| Self::new(n_spins, base_seed.wrapping_add(r as u64)))
            .collect()
    }
}
