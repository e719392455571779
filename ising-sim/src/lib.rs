pub mod clusters;
pub mod config;
pub mod error;
pub mod geometry;
pub mod simulation;
pub mod spins;
pub mod statistics;

mod parallel;

pub use clusters::{acceptance_probability, wolff_step};
pub use config::SimConfig;
pub use error::{Result, SimError};
pub use geometry::{
    DistanceMode, Lattice, LatticeKind, LatticeSpec, NeighborPolicy, NeighborTable,
    RandomLattice, RandomLatticeBuilder,
};
pub use simulation::{run_replicas, IsingModel, Replica};
pub use spins::InteractionMatrix;
pub use statistics::{ReplicaResults, RunResult, Summary};
