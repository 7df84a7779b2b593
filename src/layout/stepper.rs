//! Greedy single-vertex layout step.
//!
//! One call to [`LayoutStepper::advance`] tries every candidate offset of one
//! vertex by moving it and reading the graph's total energy, then leaves the
//! vertex at the candidate with the lowest total. The driver (an animation
//! loop, a batch job) decides which vertex to advance and how often.

use rand::Rng;
use tracing::trace;

use super::directions::{self, Candidates, DirectionParams};
use super::viewport::Viewport;
use crate::config::LayoutConfig;
use crate::error::Result;
use crate::geometry::Point;
use crate::graph::{EnergyGraph, VertexId};

/// Hill-climbing stepper over candidate offsets.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayoutStepper {
    params: DirectionParams,
}

impl LayoutStepper {
    pub fn new(params: DirectionParams) -> Self {
        Self { params }
    }

    pub fn from_config(config: &LayoutConfig) -> Self {
        Self::new(DirectionParams {
            step: config.step,
            leaf_tolerance: config.leaf_tolerance,
            arc_angle: config.arc_angle,
        })
    }

    pub fn params(&self) -> &DirectionParams {
        &self.params
    }

    /// Candidate offsets for vertex `i` in the graph's current state.
    pub fn candidates(&self, graph: &EnergyGraph, i: usize, viewport: &Viewport) -> Result<Candidates> {
        let vertex = graph.vertex(i)?;
        Ok(directions::possible_directions(
            vertex,
            graph.is_tree(),
            viewport,
            &self.params,
        ))
    }

    /// Move vertex `i` to its best candidate position and return it.
    ///
    /// Hidden vertices, and vertices with no admissible candidate, stay put.
    pub fn advance(&self, graph: &mut EnergyGraph, i: usize, viewport: &Viewport) -> Result<Point> {
        let vertex = *graph.vertex(i)?;
        let origin = vertex.position();
        if vertex.is_hidden() {
            return Ok(origin);
        }

        let Candidates { kind, offsets } = self.candidates(graph, i, viewport)?;

        let mut energies = Vec::with_capacity(offsets.len());
        for d in &offsets {
            let p = origin + *d;
            graph.set_coords(i, p.x, p.y)?;
            energies.push(graph.total_energy());
        }

        let Some(best) = first_minimum(&energies) else {
            trace!(vertex = %VertexId(i), ?kind, "no admissible candidate");
            return Ok(origin);
        };

        let target = origin + offsets[best];
        graph.set_coords(i, target.x, target.y)?;
        trace!(
            vertex = %VertexId(i),
            ?kind,
            candidate = best,
            energy = energies[best],
            "vertex advanced"
        );
        Ok(target)
    }

    /// Advance every vertex once, in index order.
    pub fn sweep(&self, graph: &mut EnergyGraph, viewport: &Viewport) -> Result<()> {
        for i in 0..graph.vertex_count() {
            self.advance(graph, i, viewport)?;
        }
        Ok(())
    }

    /// Advance one uniformly chosen vertex. Returns `None` for an empty graph.
    pub fn advance_random<R: Rng>(
        &self,
        graph: &mut EnergyGraph,
        viewport: &Viewport,
        rng: &mut R,
    ) -> Result<Option<(VertexId, Point)>> {
        let n = graph.vertex_count();
        if n == 0 {
            return Ok(None);
        }
        let i = rng.gen_range(0..n);
        let position = self.advance(graph, i, viewport)?;
        Ok(Some((VertexId(i), position)))
    }
}

/// Index of the smallest value; ties go to the earliest.
pub(crate) fn first_minimum(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (k, &v) in values.iter().enumerate() {
        if best.is_none_or(|(_, b)| v < b) {
            best = Some((k, v));
        }
    }
    best.map(|(k, _)| k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::MoveKind;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn viewport() -> Viewport {
        Viewport::from_window(800.0, 600.0, 50.0)
    }

    /// Triangle 0-1-2 plus a pendant 3 on vertex 2: connected, not a tree.
    fn cyclic_graph() -> EnergyGraph {
        let mut g = EnergyGraph::new(5);
        g.set_coords(0, 380.0, 280.0).unwrap();
        g.set_coords(1, 420.0, 290.0).unwrap();
        g.set_coords(2, 400.0, 330.0).unwrap();
        g.set_coords(3, 60.0, 540.0).unwrap();
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        g.add_edge(2, 0).unwrap();
        g.add_edge(2, 3).unwrap();
        assert!(!g.is_tree());
        g
    }

    /// Path 0-1-2 with both ends as leaves.
    fn path_graph() -> EnergyGraph {
        let mut g = EnergyGraph::new(4);
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        assert!(g.is_tree());
        g
    }

    #[test]
    fn test_first_minimum_ties() {
        assert_eq!(first_minimum(&[]), None);
        assert_eq!(first_minimum(&[3.0, 1.0, 1.0, 2.0]), Some(1));
        assert_eq!(first_minimum(&[5.0, 5.0, 5.0]), Some(0));
    }

    #[test]
    fn test_hidden_vertex_is_skipped() {
        let mut g = cyclic_graph();
        g.set_coords(4, 123.0, 456.0).unwrap();
        let energy = g.total_energy();
        let p = LayoutStepper::default().advance(&mut g, 4, &viewport()).unwrap();
        assert_eq!(p, Point::new(123.0, 456.0));
        assert_eq!(g.total_energy(), energy);
    }

    #[test]
    fn test_advance_out_of_bounds_index() {
        let mut g = cyclic_graph();
        assert!(LayoutStepper::default().advance(&mut g, 5, &viewport()).is_err());
    }

    #[test]
    fn test_orthogonal_step_does_not_raise_energy() {
        let mut g = cyclic_graph();
        let stepper = LayoutStepper::default();
        for i in 0..4 {
            let before = g.total_energy();
            let p = stepper.advance(&mut g, i, &viewport()).unwrap();
            assert_eq!(g.position(i).unwrap(), p);
            assert!(g.total_energy() <= before + 1e-6);
        }
    }

    #[test]
    fn test_orthogonal_step_moves_one_unit() {
        let mut g = cyclic_graph();
        let origin = g.position(0).unwrap();
        let p = LayoutStepper::default().advance(&mut g, 0, &viewport()).unwrap();
        let moved = (p - origin).length();
        assert!(moved == 0.0 || (moved - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_stays_within_bounds() {
        let vp = viewport();
        let mut g = cyclic_graph();
        // Strong repulsion drives vertices against the margins.
        g.set_vertex_repel_coeff(50_000.0);
        let stepper = LayoutStepper::default();
        for _ in 0..300 {
            stepper.sweep(&mut g, &vp).unwrap();
        }
        for (_, v) in g.visible_vertices() {
            assert!(vp.bounds.contains(v.position()), "{:?} left bounds", v);
        }
    }

    #[test]
    fn test_tree_outlier_pulled_inward() {
        let mut g = path_graph();
        g.set_coords(0, 400.0, 300.0).unwrap();
        g.set_coords(1, 700.0, 300.0).unwrap();
        g.set_coords(2, 400.0, 550.0).unwrap();
        let p = LayoutStepper::default().advance(&mut g, 1, &viewport()).unwrap();
        assert_eq!(p, Point::new(699.0, 300.0));
    }

    #[test]
    fn test_tree_leaf_pushed_outward() {
        let mut g = path_graph();
        g.set_coords(0, 500.0, 300.0).unwrap();
        g.set_coords(1, 400.0, 300.0).unwrap();
        g.set_coords(2, 400.0, 550.0).unwrap();
        let p = LayoutStepper::default().advance(&mut g, 0, &viewport()).unwrap();
        assert_eq!(p, Point::new(501.0, 300.0));
    }

    #[test]
    fn test_tree_leaf_slides_on_circle() {
        let vp = viewport();
        let mut g = path_graph();
        g.set_coords(0, 650.0, 300.0).unwrap();
        g.set_coords(1, 400.0, 300.0).unwrap();
        g.set_coords(2, 400.0, 550.0).unwrap();

        let stepper = LayoutStepper::default();
        let c = stepper.candidates(&g, 2, &vp).unwrap();
        assert_eq!(c.kind, MoveKind::Arc);

        for _ in 0..50 {
            stepper.advance(&mut g, 2, &vp).unwrap();
        }
        let r = (g.position(2).unwrap() - vp.center).length();
        assert!((r - 250.0).abs() < 1e-6);
    }

    #[test]
    fn test_tree_leaves_reach_circle() {
        let vp = viewport();
        let mut g = path_graph();
        g.set_coords(0, 390.0, 310.0).unwrap();
        g.set_coords(1, 400.0, 300.0).unwrap();
        g.set_coords(2, 420.0, 290.0).unwrap();

        let stepper = LayoutStepper::default();
        for _ in 0..400 {
            stepper.sweep(&mut g, &vp).unwrap();
        }
        for leaf in [0, 2] {
            let r = (g.position(leaf).unwrap() - vp.center).length();
            assert!((r - vp.leaf_radius).abs() <= 1.0 + 1e-9, "leaf {leaf} at radius {r}");
        }
    }

    #[test]
    fn test_advance_random() {
        let vp = viewport();
        let mut g = cyclic_graph();
        let mut rng = SmallRng::seed_from_u64(7);
        let stepper = LayoutStepper::default();
        for _ in 0..20 {
            let (id, p) = stepper.advance_random(&mut g, &vp, &mut rng).unwrap().unwrap();
            assert!(id.index() < 5);
            assert_eq!(g.position(id.index()).unwrap(), p);
        }

        let mut empty = EnergyGraph::new(0);
        assert_eq!(stepper.advance_random(&mut empty, &vp, &mut rng).unwrap(), None);
    }
}
