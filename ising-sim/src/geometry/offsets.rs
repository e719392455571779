/// Square-lattice neighbor offsets in flat index space: right, left, down, up.
///
/// For `side = 4` this returns `[1, -1, 4, -4]`.
pub fn square(side: usize) -> [isize; 4] {
    let l = side as isize;
    [1, -1, l, -l]
}

/// Triangular-lattice neighbor offsets: the square offsets plus the
/// `(+L-1, -L+1)` diagonal, giving coordination number 6.
pub fn triangular(side: usize) -> [isize; 6] {
    let l = side as isize;
    [1, -1, l, -l, l - 1, -l + 1]
}

/// Honeycomb offsets for the two-sublattice basis (`2 * L * L` sites).
///
/// Even sites reach the odd sublattice one row up, odd sites one row down.
pub fn hexagonal(side: usize, site: usize) -> [isize; 3] {
    let l = side as isize;
    if site % 2 == 0 {
        [1, -1, -2 * l + 1]
    } else {
        [1, -1, 2 * l - 1]
    }
}
