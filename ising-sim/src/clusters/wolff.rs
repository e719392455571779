use super::utils::grow_cluster;
use crate::geometry::Lattice;
use rand::Rng;

/// Wolff bond-activation probability `1 - exp(-2K)` for coupling `K`.
#[inline]
pub fn acceptance_probability(coupling: f64) -> f64 {
    1.0 - (-2.0 * coupling).exp()
}

/// One single-cluster (Wolff) update seeded at `seed`, applied in place.
///
/// The seed is flipped first. Every coupled neighbor of a cluster member that
/// still carries the seed's original spin joins with independent probability
/// `p_add` and is flipped on joining, so a site can join at most once and the
/// frontier drains. `frontier` is scratch space reused between calls.
///
/// Returns the number of flipped spins.
pub fn wolff_step<R: Rng + ?Sized>(
    lattice: &Lattice,
    spins: &mut [i8],
    seed: usize,
    p_add: f64,
    rng: &mut R,
    frontier: &mut Vec<usize>,
) -> usize {
    let original = spins[seed];
    spins[seed] = -original;

    grow_cluster(lattice, seed, frontier, |site| {
        if spins[site] == original && rng.gen::<f64>() < p_add {
            spins[site] = -original;
            true
        } else {
            false
        }
    })
}
