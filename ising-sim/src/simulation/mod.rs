pub mod replica;

pub use replica::Replica;

use log::{debug, info};
use rand::Rng;

use crate::clusters::{acceptance_probability, wolff_step};
use crate::config::SimConfig;
use crate::error::{Result, SimError};
use crate::geometry::Lattice;
use crate::parallel::par_over_replicas;
use crate::spins::{self, InteractionMatrix};
use crate::statistics::{ReplicaResults, RunResult};

/// Ferromagnetic Ising model with coupling `K` on a fixed lattice.
///
/// Everything here is read-only after construction; the evolving spins live
/// outside the model and are passed in by `&mut`. One model can therefore
/// drive any number of replicas concurrently.
#[derive(Debug, Clone)]
pub struct IsingModel {
    pub lattice: Lattice,
    pub coupling: f64,
    /// Wolff bond-activation probability `1 - exp(-2K)`.
    pub p_add: f64,
    pub interactions: InteractionMatrix,
}

impl IsingModel {
    pub fn new(lattice: Lattice, coupling: f64) -> Result<Self> {
        if !coupling.is_finite() || coupling < 0.0 {
            return Err(SimError::InvalidCoupling(coupling));
        }
        let interactions = InteractionMatrix::new(&lattice, coupling);
        Ok(Self {
            p_add: acceptance_probability(coupling),
            lattice,
            coupling,
            interactions,
        })
    }

    #[inline]
    pub fn n_spins(&self) -> usize {
        self.lattice.n_spins
    }

    pub fn energy(&self, spins: &[i8]) -> f64 {
        self.interactions.energy(spins)
    }

    /// One Wolff update seeded at `seed`; returns the cluster size.
    #[inline]
    pub fn step<R: Rng + ?Sized>(
        &self,
        spins: &mut [i8],
        seed: usize,
        rng: &mut R,
        frontier: &mut Vec<usize>,
    ) -> usize {
        wolff_step(&self.lattice, spins, seed, self.p_add, rng, frontier)
    }

    /// Run the equilibration and sampling schedule on one spin configuration.
    ///
    /// Each of the `n_eq + n_samples` iterations seeds one Wolff update at a
    /// uniformly random site. From step `n_eq` on, every step whose index is a
    /// multiple of `samp_rate` records |m| and the energy (and, with a
    /// reference site, adds `sᵢ · s_ref` into the correlation accumulator),
    /// up to `n_samples / samp_rate` records.
    ///
    /// `on_step` is called once per iteration (useful for progress bars).
    pub fn run<R: Rng + ?Sized>(
        &self,
        spins: &mut [i8],
        rng: &mut R,
        config: &SimConfig,
        on_step: &(dyn Fn() + Sync),
    ) -> Result<RunResult> {
        let n_spins = self.n_spins();
        config.check(n_spins)?;
        if spins.len() != n_spins {
            return Err(SimError::InvalidConfig(format!(
                "spin configuration has {} sites, lattice has {n_spins}",
                spins.len()
            )));
        }

        let n_records = config.n_records();
        let n_steps = config.n_eq + config.n_samples;

        let mut magnetization = Vec::with_capacity(n_records);
        let mut energy = Vec::with_capacity(n_records);
        let mut correlation = config.correlation_site.map(|_| vec![0.0f64; n_spins]);
        let mut frontier = Vec::with_capacity(n_spins);
        let mut flipped = 0usize;

        for step_id in 0..n_steps {
            on_step();
            let seed = rng.gen_range(0..n_spins);
            flipped += self.step(spins, seed, rng, &mut frontier);

            let record = step_id >= config.n_eq
                && step_id % config.samp_rate == 0
                && magnetization.len() < n_records;
            if !record {
                continue;
            }

            magnetization.push(spins::magnetization(spins).abs());
            energy.push(self.energy(spins));

            if let (Some(site), Some(acc)) = (config.correlation_site, correlation.as_mut()) {
                let s_ref = spins[site] as f64;
                for (a, &s) in acc.iter_mut().zip(spins.iter()) {
                    *a += s as f64 * s_ref;
                }
            }
        }

        let n_taken = magnetization.len();
        if let Some(acc) = correlation.as_mut() {
            if n_taken > 0 {
                let inv = 1.0 / n_taken as f64;
                acc.iter_mut().for_each(|a| *a *= inv);
            }
        }

        Ok(RunResult {
            magnetization,
            energy,
            correlation,
            mean_cluster_size: if n_steps > 0 {
                flipped as f64 / n_steps as f64
            } else {
                0.0
            },
        })
    }
}

/// Run `n_replicas` independent replicas of one parameter point.
///
/// Replica `r` starts from random spins drawn with seed `base_seed + r`.
/// Replicas run on the rayon pool unless `config.sequential` is set; the
/// lattice (including a shared random-lattice relation) is only read.
pub fn run_replicas(
    model: &IsingModel,
    config: &SimConfig,
    n_replicas: usize,
    base_seed: u64,
    on_step: &(dyn Fn() + Sync),
) -> Result<ReplicaResults> {
    config.check(model.n_spins())?;

    info!(
        "running {n_replicas} replicas: {} L={} K={} next_nearest={} n_eq={} n_samples={} samp_rate={}",
        model.lattice.kind(),
        model.lattice.side(),
        model.coupling,
        model.lattice.spec.next_nearest,
        config.n_eq,
        config.n_samples,
        config.samp_rate,
    );

    let mut replicas = Replica::seeded(n_replicas, model.n_spins(), base_seed);
    let runs = par_over_replicas(&mut replicas, config.sequential, |r, rep| {
        let res = model.run(&mut rep.spins, &mut rep.rng, config, on_step);
        if let Ok(ref run) = res {
            debug!(
                "replica {r} done: {} samples, mean cluster size {:.2}",
                run.magnetization.len(),
                run.mean_cluster_size
            );
        }
        res
    });
    let runs = runs.into_iter().collect::<Result<Vec<_>>>()?;

    let results = ReplicaResults::from_runs(runs);
    info!(
        "<|m|> = {:.5}, <E> = {:.5}, mean cluster size {:.2}",
        results.summary.mag, results.summary.energy, results.summary.mean_cluster_size
    );
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::LatticeKind;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn square_model(side: usize, k: f64) -> IsingModel {
        IsingModel::new(Lattice::regular(LatticeKind::Square, side, false).unwrap(), k).unwrap()
    }

    fn config(n_eq: usize, n_samples: usize, samp_rate: usize) -> SimConfig {
        SimConfig {
            n_eq,
            n_samples,
            samp_rate,
            ..Default::default()
        }
    }

    #[test]
    fn test_series_lengths() {
        let model = square_model(4, 0.4);
        let mut rep = Replica::new(model.n_spins(), 1);

        let res = model
            .run(&mut rep.spins, &mut rep.rng, &config(10, 0, 3), &|| {})
            .unwrap();
        assert!(res.magnetization.is_empty() && res.energy.is_empty());

        let res = model
            .run(&mut rep.spins, &mut rep.rng, &config(7, 25, 1), &|| {})
            .unwrap();
        assert_eq!(res.magnetization.len(), 25);
        assert_eq!(res.energy.len(), 25);

        // n_eq not a multiple of samp_rate still yields n_samples / samp_rate
        for (n_eq, n_samples, rate) in [(7, 100, 10), (5, 23, 4), (0, 9, 3), (3, 2, 5)] {
            let res = model
                .run(&mut rep.spins, &mut rep.rng, &config(n_eq, n_samples, rate), &|| {})
                .unwrap();
            assert_eq!(res.magnetization.len(), n_samples / rate);
        }
    }

    #[test]
    fn test_observable_ranges() {
        let model = square_model(6, 0.44);
        let mut rep = Replica::new(model.n_spins(), 3);
        let res = model
            .run(&mut rep.spins, &mut rep.rng, &config(50, 200, 2), &|| {})
            .unwrap();
        for &m in &res.magnetization {
            assert!((0.0..=1.0).contains(&m));
        }
        // |E| is bounded by the aligned energy 2KN.
        let bound = 2.0 * 0.44 * 36.0 + 1e-9;
        for &e in &res.energy {
            assert!(e.is_finite() && e.abs() <= bound);
        }
        assert!(res.mean_cluster_size >= 1.0);
    }

    #[test]
    fn test_on_step_called_every_iteration() {
        let model = square_model(4, 0.2);
        let mut rep = Replica::new(model.n_spins(), 0);
        let calls = AtomicUsize::new(0);
        model
            .run(&mut rep.spins, &mut rep.rng, &config(12, 30, 5), &|| {
                calls.fetch_add(1, Ordering::Relaxed);
            })
            .unwrap();
        assert_eq!(calls.load(Ordering::Relaxed), 42);
    }

    #[test]
    fn test_zero_coupling_single_spin_clusters() {
        let model = square_model(4, 0.0);
        let mut rep = Replica::new(model.n_spins(), 2);
        let res = model
            .run(&mut rep.spins, &mut rep.rng, &config(0, 40, 4), &|| {})
            .unwrap();
        assert_eq!(res.mean_cluster_size, 1.0);
        for &e in &res.energy {
            assert_eq!(e, 0.0);
        }
    }

    #[test]
    fn test_strong_coupling_orders() {
        // With p_add = 1 every step flips the seed's whole domain; after the
        // first step from an aligned state the lattice stays aligned.
        let model = square_model(4, 50.0);
        let mut spins = vec![1i8; 16];
        let mut rng = Xoshiro256StarStar::seed_from_u64(8);
        let res = model
            .run(&mut spins, &mut rng, &config(0, 10, 1), &|| {})
            .unwrap();
        assert!(res.magnetization.iter().all(|&m| m == 1.0));
        assert_eq!(res.mean_cluster_size, 16.0);
    }

    #[test]
    fn test_correlation_vector() {
        let model = square_model(4, 0.3);
        let mut rep = Replica::new(model.n_spins(), 4);
        let cfg = SimConfig {
            correlation_site: Some(5),
            ..config(20, 60, 3)
        };
        let res = model.run(&mut rep.spins, &mut rep.rng, &cfg, &|| {}).unwrap();
        let corr = res.correlation.unwrap();
        assert_eq!(corr.len(), 16);
        assert_eq!(corr[5], 1.0);
        assert!(corr.iter().all(|&c| (-1.0..=1.0).contains(&c)));

        let res = model
            .run(&mut rep.spins, &mut rep.rng, &config(0, 5, 1), &|| {})
            .unwrap();
        assert!(res.correlation.is_none());
    }

    #[test]
    fn test_correlation_without_samples_stays_zero() {
        let model = square_model(4, 0.3);
        let mut rep = Replica::new(model.n_spins(), 4);
        let cfg = SimConfig {
            correlation_site: Some(0),
            ..config(5, 0, 1)
        };
        let res = model.run(&mut rep.spins, &mut rep.rng, &cfg, &|| {}).unwrap();
        assert_eq!(res.correlation, Some(vec![0.0; 16]));
    }

    #[test]
    fn test_invalid_inputs() {
        let lat = Lattice::regular(LatticeKind::Square, 4, false).unwrap();
        assert_eq!(
            IsingModel::new(lat.clone(), -0.1).unwrap_err(),
            SimError::InvalidCoupling(-0.1)
        );
        assert!(IsingModel::new(lat.clone(), f64::NAN).is_err());

        let model = IsingModel::new(lat, 0.3).unwrap();
        let mut spins = vec![1i8; 9];
        let mut rng = Xoshiro256StarStar::seed_from_u64(0);
        assert!(matches!(
            model.run(&mut spins, &mut rng, &SimConfig::default(), &|| {}),
            Err(SimError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_run_replicas_shapes_and_reproducibility() {
        let model = square_model(5, 0.4);
        let cfg = config(20, 50, 5);
        let a = run_replicas(&model, &cfg, 4, 100, &|| {}).unwrap();
        assert_eq!(a.n_replicas(), 4);
        for row in a.magnetization.iter().chain(a.energy.iter()) {
            assert_eq!(row.len(), 10);
        }
        assert_eq!(a.summary.n_samples, 40);

        let seq = SimConfig {
            sequential: true,
            ..cfg
        };
        let b = run_replicas(&model, &seq, 4, 100, &|| {}).unwrap();
        assert_eq!(a.magnetization, b.magnetization);
        assert_eq!(a.energy, b.energy);
    }
}
