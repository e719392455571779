use super::autocorrelation::integrated_time;
use super::stats::Statistics;

/// Observables of one run, in sampling order.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    /// |m| per sample.
    pub magnetization: Vec<f64>,
    /// Total energy `sᵀ M s / 2` per sample.
    pub energy: Vec<f64>,
    /// Time-averaged `⟨sᵢ s_ref⟩` per site, when a reference site was given.
    pub correlation: Option<Vec<f64>>,
    /// Mean number of flipped spins per cluster step, over every step of the run.
    pub mean_cluster_size: f64,
}

/// Sample statistics pooled over all replicas of one parameter point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub n_samples: usize,
    /// ⟨|m|⟩.
    pub mag: f64,
    /// ⟨m²⟩.
    pub mag2: f64,
    pub mag_variance: f64,
    /// ⟨E⟩.
    pub energy: f64,
    pub energy_variance: f64,
    pub mean_cluster_size: f64,
    /// Integrated autocorrelation time of |m| in samples, averaged over replicas.
    pub mag_tau: f64,
}

/// Results of all replicas of one parameter point.
///
/// `magnetization` and `energy` are row-per-replica matrices of shape
/// `[n_replicas, n_samples / samp_rate]`.
#[derive(Debug, Clone)]
pub struct ReplicaResults {
    pub magnetization: Vec<Vec<f64>>,
    pub energy: Vec<Vec<f64>>,
    /// One correlation vector per replica; empty without a reference site.
    pub correlation: Vec<Vec<f64>>,
    pub summary: Summary,
}

impl ReplicaResults {
    pub fn from_runs(runs: Vec<RunResult>) -> Self {
        let n = runs.len();
        let mut mag = Statistics::new();
        let mut energy = Statistics::new();
        let mut cluster = Statistics::new();
        let mut tau = Statistics::new();

        let mut magnetization = Vec::with_capacity(n);
        let mut energies = Vec::with_capacity(n);
        let mut correlation = Vec::new();

        for run in runs {
            mag.extend(&run.magnetization);
            energy.extend(&run.energy);
            cluster.update(run.mean_cluster_size);
            if !run.magnetization.is_empty() {
                tau.update(integrated_time(&run.magnetization));
            }
            if let Some(c) = run.correlation {
                correlation.push(c);
            }
            magnetization.push(run.magnetization);
            energies.push(run.energy);
        }

        let summary = Summary {
            n_samples: mag.count,
            mag: mag.mean(),
            mag2: mag.mean2(),
            mag_variance: mag.variance(),
            energy: energy.mean(),
            energy_variance: energy.variance(),
            mean_cluster_size: cluster.mean(),
            mag_tau: tau.mean(),
        };

        Self {
            magnetization,
            energy: energies,
            correlation,
            summary,
        }
    }

    pub fn n_replicas(&self) -> usize {
        self.magnetization.len()
    }

    /// Site-wise mean of the per-replica correlation vectors.
    pub fn mean_correlation(&self) -> Option<Vec<f64>> {
        let first = self.correlation.first()?;
        let mut mean = vec![0.0; first.len()];
        for c in &self.correlation {
            for (m, &v) in mean.iter_mut().zip(c) {
                *m += v;
            }
        }
        let k = self.correlation.len() as f64;
        mean.iter_mut().for_each(|m| *m /= k);
        Some(mean)
    }
}
