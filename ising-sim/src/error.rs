//! Error types for ising-sim.

use thiserror::Error;

use crate::geometry::LatticeKind;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    #[error("unknown lattice kind '{0}', expected 'square', 'triangular', 'hexagonal', or 'random'")]
    UnknownLatticeKind(String),

    #[error("distance query is only implemented for the square lattice, got {0}")]
    UnsupportedDistance(LatticeKind),

    #[error("lattice side length must be >= 1, got {0}")]
    InvalidSide(usize),

    #[error("coupling must be finite and >= 0, got {0}")]
    InvalidCoupling(f64),

    #[error("neighbor relation has {found} sites, expected {expected}")]
    RelationSizeMismatch { expected: usize, found: usize },

    #[error("neighbor relation is not symmetric: {neighbor} is a neighbor of {site} but not vice versa")]
    AsymmetricRelation { site: usize, neighbor: usize },

    #[error("neighbor relation lists site {0} as its own neighbor")]
    SelfLoop(usize),

    #[error("site {site} out of range for lattice of {n_spins} sites")]
    SiteOutOfRange { site: usize, n_spins: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, SimError>;
