//! Vertex type and related structures.
//!
//! Vertices occupy fixed slots in the graph. Each vertex has:
//! - A stable slot identifier (never reassigned or compacted)
//! - Position (x, y) in layout space
//! - Degree, maintained by the graph at edge mutation sites
//!
//! A vertex whose degree is zero is *hidden*: it keeps its slot and
//! coordinates but takes no part in energy, layout or component counts.

use std::fmt;

use crate::geometry::Point;

/// Stable vertex identifier.
///
/// Wraps the slot index. Slots are allocated once, at graph construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub usize);

impl VertexId {
    /// Create a new VertexId from a raw slot index.
    #[inline]
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw slot index.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vertex({})", self.0)
    }
}

impl From<usize> for VertexId {
    #[inline]
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl From<VertexId> for usize {
    #[inline]
    fn from(id: VertexId) -> Self {
        id.0
    }
}

/// Position and degree record for one vertex slot.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
    pub(crate) degree: u32,
}

impl Vertex {
    /// Number of incident edges.
    #[inline]
    pub fn degree(&self) -> u32 {
        self.degree
    }

    /// Check if the vertex is hidden (degree zero).
    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.degree == 0
    }

    /// Check if the vertex is a leaf (exactly one incident edge).
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.degree == 1
    }

    #[inline]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Euclidean distance between two vertices.
    #[inline]
    pub fn distance(&self, other: &Vertex) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Manhattan distance between two vertices.
    #[inline]
    pub fn l1_distance(&self, other: &Vertex) -> f64 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}
