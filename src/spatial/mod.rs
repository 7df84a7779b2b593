//! Spatial indexing for O(log n) hit testing.
//!
//! This module provides an R-tree based spatial index over visible vertex
//! positions, used by the rendering layer to pick vertices under a pointer.

mod rtree;

pub use rtree::{SpatialIndex, VertexPoint};
