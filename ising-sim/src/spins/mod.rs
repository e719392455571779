pub mod energy;

pub use energy::InteractionMatrix;

use rand::Rng;

/// Independent uniformly random ±1 spins.
pub fn random_spins<R: Rng + ?Sized>(n_spins: usize, rng: &mut R) -> Vec<i8> {
    (0..n_spins)
        .map(|_| if rng.gen::<f32>() < 0.5 { -1 } else { 1 })
        .collect()
}

/// Mean spin value, in `[-1, 1]`.
pub fn magnetization(spins: &[i8]) -> f64 {
    if spins.is_empty() {
        return 0.0;
    }
    let sum: i64 = spins.iter().map(|&s| s as i64).sum();
    sum as f64 / spins.len() as f64
}
