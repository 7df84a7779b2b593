//! Property tests for the cached energy bookkeeping under random edits.

use energy_layout_wasm::{EnergyGraph, LayoutStepper, Viewport};
use proptest::prelude::*;

const N: usize = 8;

#[derive(Debug, Clone)]
enum Edit {
    Add(usize, usize),
    Delete(usize, usize),
    Move(usize, f64, f64),
}

fn edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        (0..N, 0..N).prop_map(|(a, b)| Edit::Add(a, b)),
        (0..N, 0..N).prop_map(|(a, b)| Edit::Delete(a, b)),
        (0..N, 50.0..750.0f64, 50.0..550.0f64).prop_map(|(i, x, y)| Edit::Move(i, x, y)),
    ]
}

fn apply(g: &mut EnergyGraph, e: &Edit) {
    match *e {
        Edit::Add(a, b) => g.add_edge(a, b).unwrap(),
        Edit::Delete(a, b) => g.delete_edge(a, b).unwrap(),
        Edit::Move(i, x, y) => g.set_coords(i, x, y).unwrap(),
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * a.abs().max(b.abs()).max(1.0)
}

proptest! {
    #[test]
    fn total_matches_cache_after_edits(edits in prop::collection::vec(edit(), 1..60)) {
        let mut g = EnergyGraph::new(N);
        for e in &edits {
            apply(&mut g, e);
            prop_assert!(close(g.total_energy(), g.recomputed_total_energy()));
        }
        prop_assert!(g.degree_invariant_holds());

        g.reset_weight();
        prop_assert_eq!(g.total_energy(), g.recomputed_total_energy());
    }

    #[test]
    fn pair_cache_is_symmetric_and_zero_for_hidden(edits in prop::collection::vec(edit(), 1..60)) {
        let mut g = EnergyGraph::new(N);
        for e in &edits {
            apply(&mut g, e);
        }
        for i in 0..N {
            for j in 0..N {
                let w = g.pair_energy(i, j).unwrap();
                prop_assert_eq!(w, g.pair_energy(j, i).unwrap());
                prop_assert_eq!(g.has_edge(i, j).unwrap(), g.has_edge(j, i).unwrap());
                if g.degree(i).unwrap() == 0 || g.degree(j).unwrap() == 0 || i == j {
                    prop_assert_eq!(w, 0.0);
                }
            }
        }
    }

    #[test]
    fn add_then_delete_restores(
        edits in prop::collection::vec(edit(), 0..30),
        a in 0..N,
        b in 0..N,
    ) {
        let mut g = EnergyGraph::new(N);
        for e in &edits {
            apply(&mut g, e);
        }
        prop_assume!(a != b && !g.has_edge(a, b).unwrap());

        let degrees: Vec<u32> = g.vertices().iter().map(|v| v.degree()).collect();
        let components = g.number_of_components();
        let is_tree = g.is_tree();
        let energy = g.total_energy();

        g.add_edge(a, b).unwrap();
        let edges = g.n_edges();
        g.add_edge(b, a).unwrap();
        prop_assert_eq!(g.n_edges(), edges);
        g.delete_edge(a, b).unwrap();

        let after: Vec<u32> = g.vertices().iter().map(|v| v.degree()).collect();
        prop_assert_eq!(after, degrees);
        prop_assert_eq!(g.number_of_components(), components);
        prop_assert_eq!(g.is_tree(), is_tree);
        prop_assert!(close(g.total_energy(), energy));
    }

    #[test]
    fn stepping_keeps_bookkeeping_and_bounds(
        edits in prop::collection::vec(edit(), 1..40),
        steps in prop::collection::vec(0..N, 1..60),
    ) {
        let vp = Viewport::from_window(800.0, 600.0, 50.0);
        let mut g = EnergyGraph::new(N);
        for i in 0..N {
            g.set_coords(i, 100.0 + 70.0 * i as f64, 300.0).unwrap();
        }
        for e in &edits {
            apply(&mut g, e);
        }

        let stepper = LayoutStepper::default();
        for &i in &steps {
            let free = !g.is_tree();
            let p = stepper.advance(&mut g, i, &vp).unwrap();
            if free && g.degree(i).unwrap() > 0 {
                prop_assert!(vp.bounds.contains(p));
            }
        }
        prop_assert!(close(g.total_energy(), g.recomputed_total_energy()));
    }
}
