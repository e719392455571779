use crate::simulation::Replica;
use rayon::prelude::*;

/// Run `body` once per replica, optionally in parallel, and collect the
/// outputs in replica order.
///
/// Each call gets exclusive access to one replica's spins and generator, so
/// replicas never share mutable state. When `sequential` is true, replicas
/// are processed on the current thread (no rayon overhead, best when an outer
/// level of parallelism over parameter points already saturates the cores).
pub fn par_over_replicas<T: Send>(
    replicas: &mut [Replica],
    sequential: bool,
    body: impl Fn(usize, &mut Replica) -> T + Send + Sync,
) -> Vec<T> {
    if sequential {
        replicas
            .iter_mut()
            .enumerate()
            .map(|(r, rep)| body(r, rep))
            .collect()
    } else {
        replicas
            .par_iter_mut()
            .enumerate()
            .map(|(r, rep)| body(r, rep))
            .collect()
    }
}
