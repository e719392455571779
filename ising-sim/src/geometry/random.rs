//! Random planar lattice from scattered points.
//!
//! Points are drawn uniformly in the unit square and connected by the edges
//! of every empty-circumcircle triangle, which reproduces the Delaunay
//! triangulation of the point set. The construction tests every triple
//! against every point, O(N⁴), so the resulting [`NeighborTable`] should be
//! built once per size and shared across replicas.

use std::collections::BTreeSet;

use log::{debug, warn};
use rand::Rng;
use rayon::prelude::*;

use super::neighbors::NeighborTable;

/// Points closer to the circle than this (in squared distance) count as on it.
pub const CIRCLE_TOLERANCE: f64 = 1e-8;

/// Output of [`RandomLatticeBuilder::build`]: the neighbor relation plus the
/// point coordinates, for plotting.
#[derive(Debug, Clone)]
pub struct RandomLattice {
    pub relation: NeighborTable,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl RandomLattice {
    /// Edge segments `((x_i, y_i), (x_j, y_j))`, one per undirected edge.
    pub fn segments(&self) -> impl Iterator<Item = ((f64, f64), (f64, f64))> + '_ {
        self.relation
            .edges()
            .map(|(i, j)| ((self.x[i], self.y[i]), (self.x[j], self.y[j])))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RandomLatticeBuilder {
    pub n_sites: usize,
}

impl RandomLatticeBuilder {
    pub fn new(n_sites: usize) -> Self {
        Self { n_sites }
    }

    /// Scatter `n_sites` points with `rng` and triangulate them.
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> RandomLattice {
        let n = self.n_sites;
        let x: Vec<f64> = (0..n).map(|_| rng.gen::<f64>()).collect();
        let y: Vec<f64> = (0..n).map(|_| rng.gen::<f64>()).collect();
        let relation = triangulate(&x, &y);
        RandomLattice { relation, x, y }
    }
}

/// Circumcircle `(cx, cy, r²)` through three points, or `None` when they are
/// exactly collinear.
pub fn circumcircle(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> Option<(f64, f64, f64)> {
    let (ax, ay) = a;
    let (bx, by) = b;
    let (cx, cy) = c;
    let d = 2.0 * (ax * (by - cy) + bx * (cy - ay) + cx * (ay - by));
    if d == 0.0 {
        return None;
    }
    let a2 = ax * ax + ay * ay;
    let b2 = bx * bx + by * by;
    let c2 = cx * cx + cy * cy;
    let ux = (a2 * (by - cy) + b2 * (cy - ay) + c2 * (ay - by)) / d;
    let uy = (a2 * (cx - bx) + b2 * (ax - cx) + c2 * (bx - ax)) / d;
    let r2 = (ax - ux).powi(2) + (ay - uy).powi(2);
    if !(ux.is_finite() && uy.is_finite() && r2.is_finite()) {
        return None;
    }
    Some((ux, uy, r2))
}

/// Connect every triple of points whose circumcircle holds no other point.
///
/// Triples are split over the first index on the rayon pool; each task
/// returns its triangles and the edge sets are merged afterwards.
pub fn triangulate(x: &[f64], y: &[f64]) -> NeighborTable {
    assert_eq!(x.len(), y.len(), "coordinate arrays differ in length");
    let n = x.len();

    let triangles: Vec<[usize; 3]> = (0..n)
        .into_par_iter()
        .flat_map_iter(|i| {
            let mut found = Vec::new();
            for j in i + 1..n {
                for k in j + 1..n {
                    let Some((cx, cy, r2)) = circumcircle((x[i], y[i]), (x[j], y[j]), (x[k], y[k]))
                    else {
                        continue;
                    };
                    let empty = (0..n).all(|m| {
                        m == i
                            || m == j
                            || m == k
                            || (cx - x[m]).powi(2) + (cy - y[m]).powi(2) >= r2 - CIRCLE_TOLERANCE
                    });
                    if empty {
                        found.push([i, j, k]);
                    }
                }
            }
            found
        })
        .collect();

    let mut sets = vec![BTreeSet::new(); n];
    for &[i, j, k] in &triangles {
        sets[i].extend([j, k]);
        sets[j].extend([i, k]);
        sets[k].extend([i, j]);
    }
    let relation = NeighborTable::from_sets(&sets);

    let isolated = (0..n).filter(|&i| relation.degree(i) == 0).count();
    if n >= 3 && isolated > 0 {
        warn!("random lattice of {n} points has {isolated} isolated sites");
    }
    debug!(
        "triangulated {n} points: {} triangles, {} edges",
        triangles.len(),
        relation.n_edges()
    );
    relation
}
