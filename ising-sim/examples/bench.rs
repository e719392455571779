use std::sync::Arc;
use std::time::Instant;

use ising_sim::{
    run_replicas, IsingModel, Lattice, LatticeKind, LatticeSpec, RandomLatticeBuilder, SimConfig,
};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

const L: usize = 64;
const L_RANDOM: usize = 12;
const N_REPLICAS: usize = 8;
const N_EQ: usize = 2000;
const N_SAMPLES: usize = 10000;
const SAMP_RATE: usize = 10;

fn time_point(name: &str, model: &IsingModel, config: &SimConfig) {
    let t0 = Instant::now();
    let results = run_replicas(model, config, N_REPLICAS, 42, &|| {}).unwrap();
    let elapsed = t0.elapsed().as_secs_f64();

    let n_steps = (N_REPLICAS * (N_EQ + N_SAMPLES)) as f64;
    println!(
        "{:<24} {:>8.3} s  |  {:>8.3} us/step  |  <|m|> = {:.4}  |  cluster {:.1}",
        name,
        elapsed,
        elapsed / n_steps * 1e6,
        results.summary.mag,
        results.summary.mean_cluster_size,
    );
}

fn main() {
    let config = SimConfig {
        n_eq: N_EQ,
        n_samples: N_SAMPLES,
        samp_rate: SAMP_RATE,
        ..Default::default()
    };

    println!(
        "Square: {}x{}  |  Random: {} sites  |  Replicas: {}  |  Steps: {}",
        L,
        L,
        L_RANDOM * L_RANDOM,
        N_REPLICAS,
        N_EQ + N_SAMPLES
    );
    println!("{}", "-".repeat(70));

    // Critical couplings of the nearest-neighbor models.
    for (kind, k) in [
        (LatticeKind::Square, 0.4407),
        (LatticeKind::Triangular, 0.2747),
        (LatticeKind::Hexagonal, 0.6585),
    ] {
        let lattice = Lattice::regular(kind, L, false).unwrap();
        let model = IsingModel::new(lattice, k).unwrap();
        time_point(&format!("{kind} K={k}"), &model, &config);
    }

    let lattice = Lattice::regular(LatticeKind::Square, L, true).unwrap();
    let model = IsingModel::new(lattice, 0.19).unwrap();
    time_point("square nnn K=0.19", &model, &config);

    let mut rng = Xoshiro256StarStar::seed_from_u64(7);
    let t0 = Instant::now();
    let relation = Arc::new(RandomLatticeBuilder::new(L_RANDOM * L_RANDOM).build(&mut rng).relation);
    println!(
        "random lattice built in {:.3} s ({} edges)",
        t0.elapsed().as_secs_f64(),
        relation.n_edges()
    );

    for k in [0.2, 0.3, 0.4] {
        let spec = LatticeSpec::new(LatticeKind::Random, L_RANDOM, false);
        let lattice = Lattice::build(spec, Some(Arc::clone(&relation)), &mut rng).unwrap();
        let model = IsingModel::new(lattice, k).unwrap();
        time_point(&format!("random K={k}"), &model, &config);
    }
}
