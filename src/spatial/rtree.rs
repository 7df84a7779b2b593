//! R-tree over visible vertices, using the rstar crate.
//!
//! The layout moves vertices constantly, so the index is bulk-loaded from a
//! graph snapshot rather than updated in place. Hidden vertices are never
//! indexed, so a pick can only ever land on something that is drawn.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use crate::geometry::{Bounds, Point};
use crate::graph::{EnergyGraph, VertexId};

/// An indexed vertex position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexPoint {
    pub id: VertexId,
    pub position: Point,
}

impl RTreeObject for VertexPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.position.x, self.position.y])
    }
}

impl PointDistance for VertexPoint {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.position.x - point[0];
        let dy = self.position.y - point[1];
        dx * dx + dy * dy
    }
}

/// Hit-testing index for the rendering layer.
#[derive(Default)]
pub struct SpatialIndex {
    tree: RTree<VertexPoint>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index the visible vertices of `graph`.
    pub fn from_graph(graph: &EnergyGraph) -> Self {
        let mut index = Self::new();
        index.rebuild(graph);
        index
    }

    /// Replace the contents with the visible vertices of `graph`.
    pub fn rebuild(&mut self, graph: &EnergyGraph) {
        let points = graph
            .visible_vertices()
            .map(|(id, v)| VertexPoint {
                id,
                position: v.position(),
            })
            .collect();
        self.tree = RTree::bulk_load(points);
    }

    pub fn nearest(&self, p: Point) -> Option<VertexId> {
        self.tree.nearest_neighbor(&[p.x, p.y]).map(|vp| vp.id)
    }

    /// Nearest vertex no farther than `max_distance` from `p`.
    pub fn nearest_within(&self, p: Point, max_distance: f64) -> Option<VertexId> {
        let query = [p.x, p.y];
        self.tree
            .nearest_neighbor(&query)
            .filter(|vp| vp.distance_2(&query) <= max_distance * max_distance)
            .map(|vp| vp.id)
    }

    /// Vertices inside `bounds`, in no particular order.
    pub fn in_bounds(&self, bounds: &Bounds) -> Vec<VertexId> {
        let envelope = AABB::from_corners([bounds.min_x, bounds.min_y], [bounds.max_x, bounds.max_y]);
        self.tree
            .locate_in_envelope(&envelope)
            .map(|vp| vp.id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
