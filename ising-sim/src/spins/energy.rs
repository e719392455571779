use crate::geometry::Lattice;

/// Symmetric coupling matrix `M` with `M[i][j] = K` for every coupled pair.
///
/// Stored row-compressed: row `i` lists the sites coupled to `i` under the
/// lattice's neighbor policy, each with value `K`. The diagonal is always 0
/// because neighbor tables carry no self-loops.
#[derive(Debug, Clone)]
pub struct InteractionMatrix {
    n: usize,
    row_ptr: Vec<usize>,
    cols: Vec<u32>,
    values: Vec<f64>,
}

impl InteractionMatrix {
    pub fn new(lattice: &Lattice, coupling: f64) -> Self {
        let n = lattice.n_spins;
        let mut row_ptr = Vec::with_capacity(n + 1);
        let mut cols = Vec::new();
        row_ptr.push(0);
        for i in 0..n {
            cols.extend_from_slice(lattice.coupled(i));
            row_ptr.push(cols.len());
        }
        let values = vec![coupling; cols.len()];

        let m = Self {
            n,
            row_ptr,
            cols,
            values,
        };
        debug_assert!(m.is_symmetric() && m.diagonal_is_zero());
        m
    }

    /// Matrix dimension `N`.
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Nonzero entries `(j, M[i][j])` of row `i`.
    pub fn row(&self, i: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let span = self.row_ptr[i]..self.row_ptr[i + 1];
        self.cols[span.clone()]
            .iter()
            .zip(&self.values[span])
            .map(|(&j, &v)| (j as usize, v))
    }

    /// Entry `M[i][j]`, zero when the pair is not coupled.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        let span = self.row_ptr[i]..self.row_ptr[i + 1];
        match self.cols[span.clone()].binary_search(&(j as u32)) {
            Ok(k) => self.values[span.start + k],
            Err(_) => 0.0,
        }
    }

    pub fn nnz(&self) -> usize {
        self.cols.len()
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.n).all(|i| self.row(i).all(|(j, v)| self.get(j, i) == v))
    }

    pub fn diagonal_is_zero(&self) -> bool {
        (0..self.n).all(|i| self.get(i, i) == 0.0)
    }

    /// Dense `N × N` copy, row-major.
    pub fn to_dense(&self) -> Vec<Vec<f64>> {
        (0..self.n)
            .map(|i| {
                let mut row = vec![0.0; self.n];
                for (j, v) in self.row(i) {
                    row[j] = v;
                }
                row
            })
            .collect()
    }

    /// Total energy `sᵀ M s / 2`; the half removes the double counting of
    /// symmetric pairs.
    pub fn energy(&self, spins: &[i8]) -> f64 {
        debug_assert_eq!(spins.len(), self.n);
        let mut total = 0.0f64;
        for (i, &si) in spins.iter().enumerate() {
            let mut field = 0.0f64;
            for (j, v) in self.row(i) {
                field += v * spins[j] as f64;
            }
            total += si as f64 * field;
        }
        total / 2.0
    }
}

/// Energy as a sum over undirected coupled pairs, `Σ_{i<j} K sᵢ sⱼ`.
pub fn pairwise_energy(lattice: &Lattice, spins: &[i8], coupling: f64) -> f64 {
    lattice
        .coupled_table()
        .edges()
        .map(|(i, j)| coupling * spins[i] as f64 * spins[j] as f64)
        .sum()
}
