pub mod distance;
pub mod lattice;
pub mod neighbors;
pub mod offsets;
pub mod random;

pub use distance::DistanceMode;
pub use lattice::{Lattice, LatticeKind, LatticeSpec, NeighborPolicy};
pub use neighbors::NeighborTable;
pub use random::{RandomLattice, RandomLatticeBuilder};
