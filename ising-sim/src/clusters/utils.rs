use crate::geometry::Lattice;

/// Grow a cluster outward from `seed` over the lattice's coupled neighbors.
///
/// The seed counts as already in the cluster. Its neighbors are pushed onto
/// `frontier`, then candidates are popped LIFO and handed to `try_add`; when
/// it returns `true` the candidate joined and its own neighbors are pushed.
/// A rejected entry is dropped. The same site may be pushed again through a
/// different cluster member, which is a separate bond and gets a fresh test.
///
/// `try_add` must make a joined site fail every later test (the Wolff update
/// does this by flipping it), otherwise growth does not terminate.
///
/// Returns the cluster size, seed included. `frontier` is cleared first and
/// left empty, so callers can reuse the buffer across steps.
#[inline]
pub(super) fn grow_cluster(
    lattice: &Lattice,
    seed: usize,
    frontier: &mut Vec<usize>,
    mut try_add: impl FnMut(usize) -> bool,
) -> usize {
    frontier.clear();
    frontier.extend(lattice.coupled(seed).iter().map(|&j| j as usize));
    let mut size = 1;

    while let Some(site) = frontier.pop() {
        if try_add(site) {
            size += 1;
            frontier.extend(lattice.coupled(site).iter().map(|&j| j as usize));
        }
    }
    size
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::LatticeKind;
    use std::collections::HashSet;

    // 4×4 square lattice, flat offsets (+1, -1, +4, -4) mod 16:
    //
    //    0  1  2  3
    //    4  5  6  7
    //    8  9 10 11
    //   12 13 14 15
    //
    // Allowed sites {0, 1, 2, 5, 9}: from seed 1 the cluster reaches
    // 0, 2, 5 and then 9 through 5.

    #[test]
    fn test_grow_over_allowed_sites() {
        let lattice = Lattice::regular(LatticeKind::Square, 4, false).unwrap();
        let allowed: HashSet<usize> = [0, 1, 2, 5, 9].into_iter().collect();
        let mut joined: HashSet<usize> = [1].into_iter().collect();
        let mut frontier = Vec::new();

        let size = grow_cluster(&lattice, 1, &mut frontier, |site| {
            allowed.contains(&site) && joined.insert(site)
        });

        assert_eq!(size, 5);
        assert_eq!(joined, allowed);
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_rejecting_everything_keeps_seed_only() {
        let lattice = Lattice::regular(LatticeKind::Hexagonal, 3, true).unwrap();
        let mut frontier = vec![7, 7, 7];
        let mut calls = 0;
        let size = grow_cluster(&lattice, 4, &mut frontier, |_| {
            calls += 1;
            false
        });
        assert_eq!(size, 1);
        assert_eq!(calls, lattice.coupled(4).len());
    }
}
