use std::path::Path;

use ising_sim::{LatticeKind, SimConfig};
use serde::Deserialize;

use crate::CliError;

/// Everything needed to run one parameter point.
///
/// Read from YAML with every field optional, e.g.
///
/// ```yaml
/// lattice: triangular
/// side: 16
/// coupling: 0.27
/// next_nearest: false
/// replicas: 8
/// seed: 42
/// n_eq: 1000
/// n_samples: 4000
/// samp_rate: 10
/// correlation_site: 0
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub lattice: LatticeKind,
    pub side: usize,
    pub coupling: f64,
    pub next_nearest: bool,
    pub replicas: usize,
    pub seed: u64,
    #[serde(flatten)]
    pub sim: SimConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            lattice: LatticeKind::Square,
            side: 16,
            coupling: 0.44,
            next_nearest: false,
            replicas: 4,
            seed: 42,
            sim: SimConfig::default(),
        }
    }
}

pub fn read_run_config(path: &Path) -> Result<RunConfig, CliError> {
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    Ok(serde_yaml::from_reader(reader)?)
}
