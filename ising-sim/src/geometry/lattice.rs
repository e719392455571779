use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use log::debug;
use rand::Rng;
use serde::Deserialize;

use super::neighbors::NeighborTable;
use super::offsets;
use super::random::RandomLatticeBuilder;
use crate::error::{Result, SimError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum LatticeKind {
    Square,
    Triangular,
    Hexagonal,
    Random,
}

impl LatticeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Square => "square",
            Self::Triangular => "triangular",
            Self::Hexagonal => "hexagonal",
            Self::Random => "random",
        }
    }

    /// Number of sites for side length `side`.
    pub fn n_spins(&self, side: usize) -> usize {
        match self {
            Self::Hexagonal => 2 * side * side,
            _ => side * side,
        }
    }
}

impl fmt::Display for LatticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for LatticeKind {
    type Error = SimError;
    fn try_from(s: &str) -> Result<Self> {
        match s {
            "square" => Ok(Self::Square),
            "triangular" => Ok(Self::Triangular),
            "hexagonal" => Ok(Self::Hexagonal),
            "random" => Ok(Self::Random),
            _ => Err(SimError::UnknownLatticeKind(s.to_string())),
        }
    }
}

impl TryFrom<String> for LatticeKind {
    type Error = SimError;
    fn try_from(s: String) -> Result<Self> {
        Self::try_from(s.as_str())
    }
}

impl FromStr for LatticeKind {
    type Err = SimError;
    fn from_str(s: &str) -> Result<Self> {
        Self::try_from(s)
    }
}

/// Which sites a spin couples to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeighborPolicy {
    Nearest,
    /// Nearest neighbors plus neighbors-of-neighbors.
    NextNearest,
}

impl From<bool> for NeighborPolicy {
    fn from(next_nearest: bool) -> Self {
        if next_nearest {
            Self::NextNearest
        } else {
            Self::Nearest
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatticeSpec {
    pub kind: LatticeKind,
    /// Side length `L`.
    pub side: usize,
    pub next_nearest: bool,
}

impl LatticeSpec {
    pub fn new(kind: LatticeKind, side: usize, next_nearest: bool) -> Self {
        Self {
            kind,
            side,
            next_nearest,
        }
    }

    pub fn n_spins(&self) -> usize {
        self.kind.n_spins(self.side)
    }

    pub fn policy(&self) -> NeighborPolicy {
        self.next_nearest.into()
    }
}

/// Periodic 2D lattice with precomputed neighbor tables.
///
/// The direct table is built once from the lattice offsets (or taken from a
/// random-lattice relation). The coupled table is the one the neighbor policy
/// selects; it is what the interaction matrix and the cluster update read.
/// Both tables are read-only and can be shared between replicas.
#[derive(Debug, Clone)]
pub struct Lattice {
    pub spec: LatticeSpec,
    /// Total number of sites.
    pub n_spins: usize,
    direct: Arc<NeighborTable>,
    coupled: Arc<NeighborTable>,
}

impl Lattice {
    /// Build a lattice for `spec`.
    ///
    /// For the random kind, `relation` is reused when given; otherwise a fresh
    /// relation is built with `rng`, which costs O(N⁴). For the other kinds
    /// `relation` must be `None` and `rng` is not touched.
    pub fn build<R: Rng + ?Sized>(
        spec: LatticeSpec,
        relation: Option<Arc<NeighborTable>>,
        rng: &mut R,
    ) -> Result<Self> {
        if spec.side == 0 {
            return Err(SimError::InvalidSide(spec.side));
        }
        let n_spins = spec.n_spins();

        let direct = match (spec.kind, relation) {
            (LatticeKind::Random, Some(rel)) => {
                if rel.n_sites() != n_spins {
                    return Err(SimError::RelationSizeMismatch {
                        expected: n_spins,
                        found: rel.n_sites(),
                    });
                }
                rel.validate()?;
                rel
            }
            (LatticeKind::Random, None) => {
                Arc::new(RandomLatticeBuilder::new(n_spins).build(rng).relation)
            }
            (_, Some(_)) => {
                return Err(SimError::InvalidConfig(format!(
                    "a precomputed neighbor relation only applies to the random lattice, got {}",
                    spec.kind
                )))
            }
            (kind, None) => Arc::new(regular_table(kind, spec.side)),
        };

        Ok(Self::assemble(spec, direct))
    }

    /// Build a square, triangular or hexagonal lattice.
    pub fn regular(kind: LatticeKind, side: usize, next_nearest: bool) -> Result<Self> {
        if kind == LatticeKind::Random {
            return Err(SimError::InvalidConfig(
                "the random lattice needs a generator or a precomputed relation".to_string(),
            ));
        }
        if side == 0 {
            return Err(SimError::InvalidSide(side));
        }
        let spec = LatticeSpec::new(kind, side, next_nearest);
        Ok(Self::assemble(spec, Arc::new(regular_table(kind, side))))
    }

    fn assemble(spec: LatticeSpec, direct: Arc<NeighborTable>) -> Self {
        let coupled = match spec.policy() {
            NeighborPolicy::Nearest => Arc::clone(&direct),
            NeighborPolicy::NextNearest => Arc::new(direct.next_nearest()),
        };

        debug!(
            "built {} lattice: L={}, N={}, edges={}, coupled max degree={}",
            spec.kind,
            spec.side,
            spec.n_spins(),
            direct.n_edges(),
            coupled.max_degree(),
        );

        Self {
            spec,
            n_spins: spec.n_spins(),
            direct,
            coupled,
        }
    }

    #[inline]
    pub fn kind(&self) -> LatticeKind {
        self.spec.kind
    }

    #[inline]
    pub fn side(&self) -> usize {
        self.spec.side
    }

    #[inline]
    pub fn policy(&self) -> NeighborPolicy {
        self.spec.policy()
    }

    /// Direct neighbors of `site`.
    #[inline]
    pub fn neighbors(&self, site: usize) -> &[u32] {
        self.direct.neighbors(site)
    }

    /// Sites coupled to `site` under the lattice's neighbor policy.
    #[inline]
    pub fn coupled(&self, site: usize) -> &[u32] {
        self.coupled.neighbors(site)
    }

    /// Neighbor set of `site`, either direct or next-nearest, independent of
    /// the policy the lattice was built with.
    pub fn neighbor_set(&self, site: usize, next_nearest: bool) -> BTreeSet<usize> {
        match (NeighborPolicy::from(next_nearest), self.policy()) {
            (NeighborPolicy::Nearest, _) => self.direct.neighbor_set(site),
            (NeighborPolicy::NextNearest, NeighborPolicy::NextNearest) => {
                self.coupled.neighbor_set(site)
            }
            (NeighborPolicy::NextNearest, NeighborPolicy::Nearest) => {
                let mut set = BTreeSet::new();
                for &j in self.neighbors(site) {
                    set.insert(j as usize);
                    set.extend(self.neighbors(j as usize).iter().map(|&k| k as usize));
                }
                set.remove(&site);
                set
            }
        }
    }

    /// The direct neighbor relation, shareable with other lattices of the same size.
    pub fn relation(&self) -> &Arc<NeighborTable> {
        &self.direct
    }

    pub fn coupled_table(&self) -> &NeighborTable {
        &self.coupled
    }
}

/// Direct neighbor table of a periodic square, triangular or hexagonal lattice.
///
/// Offsets are applied in flat index space modulo `N`; on tiny lattices where
/// two offsets land on the same site (or on the site itself) the duplicates
/// are dropped.
fn regular_table(kind: LatticeKind, side: usize) -> NeighborTable {
    let n = kind.n_spins(side) as isize;
    let wrap = |i: usize, off: isize| (i as isize + off).rem_euclid(n) as usize;

    NeighborTable::from_fn(n as usize, |i, set| match kind {
        LatticeKind::Square => set.extend(offsets::square(side).iter().map(|&o| wrap(i, o))),
        LatticeKind::Triangular => {
            set.extend(offsets::triangular(side).iter().map(|&o| wrap(i, o)))
        }
        LatticeKind::Hexagonal => {
            set.extend(offsets::hexagonal(side, i).iter().map(|&o| wrap(i, o)))
        }
        LatticeKind::Random => unreachable!("random lattices are built from a relation"),
    })
}
