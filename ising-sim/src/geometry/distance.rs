use super::lattice::{Lattice, LatticeKind};
use crate::error::{Result, SimError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceMode {
    /// Minimum-image Euclidean distance.
    #[default]
    Euclidean,
    /// Second-smallest Euclidean distance over the image set.
    SecondEuclidean,
    /// Minimum-image Manhattan (bond) distance.
    Bond,
}

/// Image shifts in units of `L` applied to a displacement canonicalized into
/// `[0, L)²`. The first four always contain the minimum image.
const IMAGE_SHIFTS: [(isize, isize); 7] = [
    (0, 0),
    (-1, 0),
    (0, -1),
    (-1, -1),
    (1, 0),
    (0, 1),
    (1, 1),
];

impl Lattice {
    /// Periodic distance between sites `a` and `b`.
    ///
    /// Only defined for the square lattice, where site `i` sits at
    /// `(i mod L, i div L)`.
    pub fn distance(&self, a: usize, b: usize, mode: DistanceMode) -> Result<f64> {
        if self.kind() != LatticeKind::Square {
            return Err(SimError::UnsupportedDistance(self.kind()));
        }
        for site in [a, b] {
            if site >= self.n_spins {
                return Err(SimError::SiteOutOfRange {
                    site,
                    n_spins: self.n_spins,
                });
            }
        }

        let l = self.side() as isize;
        let (xa, ya) = ((a as isize) % l, (a as isize) / l);
        let (xb, yb) = ((b as isize) % l, (b as isize) / l);
        let dx = (xb - xa).rem_euclid(l);
        let dy = (yb - ya).rem_euclid(l);

        let images = IMAGE_SHIFTS
            .iter()
            .map(|&(sx, sy)| ((dx + sx * l) as f64, (dy + sy * l) as f64));

        let d = match mode {
            DistanceMode::Euclidean => images.map(|(x, y)| x.hypot(y)).fold(f64::INFINITY, f64::min),
            DistanceMode::SecondEuclidean => {
                let mut d: Vec<f64> = images.map(|(x, y)| x.hypot(y)).collect();
                d.sort_by(f64::total_cmp);
                d[1]
            }
            DistanceMode::Bond => images
                .map(|(x, y)| x.abs() + y.abs())
                .fold(f64::INFINITY, f64::min),
        };
        Ok(d)
    }
}
