use std::collections::BTreeSet;

use crate::error::{Result, SimError};

/// Site adjacency in compressed row form.
///
/// Row `i` holds the sorted, deduplicated neighbor indices of site `i`:
/// `neighbors[row_ptr[i]..row_ptr[i + 1]]`. Tables built by this crate are
/// symmetric and free of self-loops; externally supplied tables can be checked
/// with [`NeighborTable::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborTable {
    row_ptr: Vec<usize>,
    neighbors: Vec<u32>,
}

impl NeighborTable {
    /// Build from one neighbor set per site.
    pub fn from_sets(sets: &[BTreeSet<usize>]) -> Self {
        let mut row_ptr = Vec::with_capacity(sets.len() + 1);
        let mut neighbors = Vec::with_capacity(sets.iter().map(|s| s.len()).sum());
        row_ptr.push(0);
        for set in sets {
            neighbors.extend(set.iter().map(|&j| j as u32));
            row_ptr.push(neighbors.len());
        }
        Self { row_ptr, neighbors }
    }

    /// Build a table by collecting `n_sites` rows from `row(i, &mut set)`.
    ///
    /// Self-references pushed by `row` are dropped.
    pub fn from_fn(n_sites: usize, mut row: impl FnMut(usize, &mut BTreeSet<usize>)) -> Self {
        let sets: Vec<BTreeSet<usize>> = (0..n_sites)
            .map(|i| {
                let mut set = BTreeSet::new();
                row(i, &mut set);
                set.remove(&i);
                set
            })
            .collect();
        Self::from_sets(&sets)
    }

    #[inline]
    pub fn n_sites(&self) -> usize {
        self.row_ptr.len() - 1
    }

    /// Neighbor indices of site `i`, sorted ascending.
    #[inline]
    pub fn neighbors(&self, i: usize) -> &[u32] {
        &self.neighbors[self.row_ptr[i]..self.row_ptr[i + 1]]
    }

    #[inline]
    pub fn degree(&self, i: usize) -> usize {
        self.row_ptr[i + 1] - self.row_ptr[i]
    }

    pub fn max_degree(&self) -> usize {
        (0..self.n_sites()).map(|i| self.degree(i)).max().unwrap_or(0)
    }

    pub fn contains(&self, i: usize, j: usize) -> bool {
        self.neighbors(i).binary_search(&(j as u32)).is_ok()
    }

    pub fn neighbor_set(&self, i: usize) -> BTreeSet<usize> {
        self.neighbors(i).iter().map(|&j| j as usize).collect()
    }

    /// Undirected edges `(i, j)` with `i < j`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.n_sites()).flat_map(move |i| {
            self.neighbors(i)
                .iter()
                .map(|&j| j as usize)
                .filter(move |&j| i < j)
                .map(move |j| (i, j))
        })
    }

    pub fn n_edges(&self) -> usize {
        self.neighbors.len() / 2
    }

    /// Check the invariants every neighbor relation must satisfy: no site
    /// lists itself, and `j ∈ N(i) ⇔ i ∈ N(j)`.
    pub fn validate(&self) -> Result<()> {
        let n = self.n_sites();
        for i in 0..n {
            for &j in self.neighbors(i) {
                let j = j as usize;
                if j == i {
                    return Err(SimError::SelfLoop(i));
                }
                if j >= n {
                    return Err(SimError::SiteOutOfRange {
                        site: j,
                        n_spins: n,
                    });
                }
                if !self.contains(j, i) {
                    return Err(SimError::AsymmetricRelation {
                        site: i,
                        neighbor: j,
                    });
                }
            }
        }
        Ok(())
    }

    /// Neighbors plus neighbors-of-neighbors, excluding the site itself.
    pub fn next_nearest(&self) -> Self {
        Self::from_fn(self.n_sites(), |i, set| {
            for &j in self.neighbors(i) {
                set.insert(j as usize);
                set.extend(self.neighbors(j as usize).iter().map(|&k| k as usize));
            }
        })
    }
}
