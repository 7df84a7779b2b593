//! Graph data structures and operations.
//!
//! This module provides the energy graph: a fixed set of vertex slots over a
//! petgraph adjacency matrix, with cached pairwise energies kept consistent
//! under every edge and coordinate mutation.

mod connectivity;
pub mod energy;
mod engine;
mod vertex;

pub use energy::{COINCIDENT_ENERGY, EPSILON, EnergyCoefficients};
pub use engine::EnergyGraph;
pub use vertex::{Vertex, VertexId};
