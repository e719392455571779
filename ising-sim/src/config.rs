use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::error::{Result, SimError};

fn validate_sim_config(cfg: &SimConfig) -> std::result::Result<(), ValidationError> {
    if cfg.samp_rate < 1 {
        return Err(ValidationError::new("samp_rate must be >= 1"));
    }
    if cfg.n_eq.checked_add(cfg.n_samples).is_none() {
        return Err(ValidationError::new("n_eq + n_samples overflows"));
    }
    Ok(())
}

/// Equilibration and sampling schedule of one run.
#[derive(Debug, Clone, PartialEq, Eq, Validate, Deserialize)]
#[validate(schema(function = "validate_sim_config"))]
#[serde(default)]
pub struct SimConfig {
    /// Cluster steps discarded before sampling starts.
    pub n_eq: usize,
    /// Cluster steps in the sampling window.
    pub n_samples: usize,
    /// Record every `samp_rate`-th step of the sampling window.
    pub samp_rate: usize,
    /// Reference site for the spin-spin correlation vector.
    pub correlation_site: Option<usize>,
    /// Run replicas on the current thread instead of the rayon pool.
    pub sequential: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            n_eq: 1000,
            n_samples: 2000,
            samp_rate: 10,
            correlation_site: None,
            sequential: false,
        }
    }
}

impl SimConfig {
    /// Number of samples a run records: `n_samples / samp_rate`.
    pub fn n_records(&self) -> usize {
        self.n_samples / self.samp_rate.max(1)
    }

    /// Validate the schedule and the correlation site against a lattice of
    /// `n_spins` sites.
    pub fn check(&self, n_spins: usize) -> Result<()> {
        self.validate()
            .map_err(|e| SimError::InvalidConfig(format!("{e}")))?;
        if let Some(site) = self.correlation_site {
            if site >= n_spins {
                return Err(SimError::SiteOutOfRange { site, n_spins });
            }
        }
        Ok(())
    }
}
