use std::sync::Arc;

use approx::assert_relative_eq;
use ising_sim::{
    run_replicas, IsingModel, Lattice, LatticeKind, LatticeSpec, RandomLatticeBuilder, SimConfig,
    SimError,
};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

fn all_lattices(side: usize) -> Vec<Lattice> {
    let mut rng = Xoshiro256StarStar::seed_from_u64(11);
    let mut out = Vec::new();
    for kind in [
        LatticeKind::Square,
        LatticeKind::Triangular,
        LatticeKind::Hexagonal,
        LatticeKind::Random,
    ] {
        for next_nearest in [false, true] {
            let spec = LatticeSpec::new(kind, side, next_nearest);
            out.push(Lattice::build(spec, None, &mut rng).unwrap());
        }
    }
    out
}

#[test]
fn neighbor_relations_are_symmetric() {
    for lat in all_lattices(5) {
        for i in 0..lat.n_spins {
            for &j in lat.coupled(i) {
                let j = j as usize;
                assert_ne!(i, j, "{:?}: self-loop at {i}", lat.spec);
                assert!(
                    lat.coupled(j).contains(&(i as u32)),
                    "{:?}: {i} -> {j} not mirrored",
                    lat.spec
                );
            }
        }
    }
}

#[test]
fn interaction_matrix_matches_topology() {
    for lat in all_lattices(4) {
        let model = IsingModel::new(lat, 0.7).unwrap();
        let m = &model.interactions;
        assert!(m.is_symmetric());
        assert!(m.diagonal_is_zero());
        for i in 0..model.n_spins() {
            for j in 0..model.n_spins() {
                let expected = if model.lattice.coupled(i).contains(&(j as u32)) {
                    0.7
                } else {
                    0.0
                };
                assert_eq!(m.get(i, j), expected);
            }
        }
    }
}

#[test]
fn end_to_end_shapes() {
    let config = SimConfig {
        n_eq: 30,
        n_samples: 95,
        samp_rate: 10,
        correlation_site: Some(0),
        sequential: false,
    };
    for lat in all_lattices(4) {
        let n = lat.n_spins;
        let model = IsingModel::new(lat, 0.35).unwrap();
        let res = run_replicas(&model, &config, 3, 5, &|| {}).unwrap();

        assert_eq!(res.magnetization.len(), 3);
        assert_eq!(res.energy.len(), 3);
        for row in res.magnetization.iter().chain(res.energy.iter()) {
            assert_eq!(row.len(), 9);
        }
        assert!(res.magnetization.iter().flatten().all(|m| (0.0..=1.0).contains(m)));
        assert!(res.energy.iter().flatten().all(|e| e.is_finite()));

        assert_eq!(res.correlation.len(), 3);
        let corr = res.mean_correlation().unwrap();
        assert_eq!(corr.len(), n);
        assert_relative_eq!(corr[0], 1.0);
    }
}

#[test]
fn random_relation_shared_across_points() {
    let side = 6;
    let mut rng = Xoshiro256StarStar::seed_from_u64(2);
    let relation = Arc::new(RandomLatticeBuilder::new(side * side).build(&mut rng).relation);

    let config = SimConfig {
        n_eq: 10,
        n_samples: 20,
        samp_rate: 2,
        ..Default::default()
    };
    for k in [0.1, 0.5, 1.0] {
        let spec = LatticeSpec::new(LatticeKind::Random, side, false);
        let lat = Lattice::build(spec, Some(Arc::clone(&relation)), &mut rng).unwrap();
        assert!(Arc::ptr_eq(lat.relation(), &relation));
        let model = IsingModel::new(lat, k).unwrap();
        let res = run_replicas(&model, &config, 2, 0, &|| {}).unwrap();
        assert_eq!(res.summary.n_samples, 20);
    }

    let spec = LatticeSpec::new(LatticeKind::Random, side + 1, false);
    assert_eq!(
        Lattice::build(spec, Some(relation), &mut rng).unwrap_err(),
        SimError::RelationSizeMismatch {
            expected: 49,
            found: 36
        }
    );
}

#[test]
fn strong_coupling_orders_every_topology() {
    // At p_add = 1 each step merges the seed's domain with all its neighbors,
    // so N equilibration steps always reach the aligned state.
    let config = SimConfig {
        n_eq: 40,
        n_samples: 10,
        samp_rate: 1,
        ..Default::default()
    };
    for kind in [
        LatticeKind::Square,
        LatticeKind::Triangular,
        LatticeKind::Hexagonal,
    ] {
        let model = IsingModel::new(Lattice::regular(kind, 4, false).unwrap(), 50.0).unwrap();
        let res = run_replicas(&model, &config, 2, 9, &|| {}).unwrap();
        for &m in res.magnetization.iter().flatten() {
            assert_eq!(m, 1.0);
        }
    }
}

#[test]
fn unknown_lattice_kind() {
    assert_eq!(
        "kagome".parse::<LatticeKind>(),
        Err(SimError::UnknownLatticeKind("kagome".to_string()))
    );
}
