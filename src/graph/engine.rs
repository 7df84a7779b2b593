//! EnergyGraph - Core graph data structure.
//!
//! The EnergyGraph stores the topology as a petgraph adjacency matrix over a
//! fixed number of vertex slots, and keeps a flat `n * n` cache of pair
//! energies next to it. The running total is adjusted by deltas whenever a
//! vertex changes, so reading the current energy is O(1) and every mutation
//! is O(n).
//!
//! The total counts every unordered pair twice, once per symmetric cache
//! entry, so it always equals the plain sum of the whole cache.

use tracing::debug;

use super::connectivity::{self, Adjacency};
use super::energy::{self, EnergyCoefficients};
use super::vertex::{Vertex, VertexId};
use crate::error::{GraphError, Result};
use crate::geometry::Point;

/// The core energy graph.
///
/// This struct manages:
/// - Graph topology via petgraph's adjacency matrix
/// - Per-vertex position and maintained degree counters
/// - Cached pair energies (row-major, symmetric)
/// - The running total energy and the tree-mode flag
///
/// Slot count is fixed at construction and bounded by the matrix index type.
#[derive(Clone)]
pub struct EnergyGraph {
    /// Undirected adjacency, one matrix node per vertex slot.
    adjacency: Adjacency,

    /// Vertex records, indexed by slot.
    vertices: Vec<Vertex>,

    /// Pair energy cache, `pair_energy[i * n + j]`.
    pair_energy: Vec<f64>,

    /// Sum of all entries of `pair_energy`.
    total_energy: f64,

    /// Whether the visible subgraph is currently a tree.
    is_tree: bool,

    coefficients: EnergyCoefficients,
}

impl EnergyGraph {
    /// Create a graph with `n` hidden vertices at the origin and no edges.
    pub fn new(n: usize) -> Self {
        Self::with_coefficients(n, EnergyCoefficients::default())
    }

    /// Create a graph with `n` vertex slots and the given coefficients.
    pub fn with_coefficients(n: usize, coefficients: EnergyCoefficients) -> Self {
        let mut adjacency = Adjacency::with_capacity(n);
        for _ in 0..n {
            adjacency.add_node(());
        }

        Self {
            adjacency,
            vertices: vec![Vertex::default(); n],
            pair_energy: vec![0.0; n * n],
            total_energy: 0.0,
            is_tree: false,
            coefficients,
        }
    }

    // =========================================================================
    // Index Handling
    // =========================================================================

    /// Number of vertex slots.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Return true for a valid vertex index.
    pub fn in_bounds(&self, index: i64) -> bool {
        index >= 0 && (index as u64) < self.vertices.len() as u64
    }

    /// Convert a signed index (as received from callers) into a slot index.
    pub fn resolve_index(&self, index: i64) -> Result<usize> {
        if self.in_bounds(index) {
            Ok(index as usize)
        } else {
            Err(self.out_of_bounds(index))
        }
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.vertices.len() {
            Ok(())
        } else {
            Err(self.out_of_bounds(i64::try_from(index).unwrap_or(i64::MAX)))
        }
    }

    fn out_of_bounds(&self, index: i64) -> GraphError {
        GraphError::IndexOutOfBounds {
            index,
            len: self.vertices.len(),
        }
    }

    // =========================================================================
    // Read Accessors
    // =========================================================================

    pub fn vertex(&self, i: usize) -> Result<&Vertex> {
        self.check_index(i)?;
        Ok(&self.vertices[i])
    }

    /// All vertex slots, hidden ones included.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Visible vertices with their ids.
    pub fn visible_vertices(&self) -> impl Iterator<Item = (VertexId, &Vertex)> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_hidden())
            .map(|(i, v)| (VertexId(i), v))
    }

    pub fn position(&self, i: usize) -> Result<Point> {
        Ok(self.vertex(i)?.position())
    }

    pub fn degree(&self, i: usize) -> Result<u32> {
        Ok(self.vertex(i)?.degree())
    }

    /// Check if an edge joins `i` and `j`.
    pub fn has_edge(&self, i: usize, j: usize) -> Result<bool> {
        self.check_index(i)?;
        self.check_index(j)?;
        Ok(self.adjacent(i, j))
    }

    /// Cached energy of the pair `(i, j)`.
    pub fn pair_energy(&self, i: usize, j: usize) -> Result<f64> {
        self.check_index(i)?;
        self.check_index(j)?;
        Ok(self.pair_energy[i * self.vertices.len() + j])
    }

    #[inline]
    pub fn total_energy(&self) -> f64 {
        self.total_energy
    }

    #[inline]
    pub fn is_tree(&self) -> bool {
        self.is_tree
    }

    pub fn coefficients(&self) -> EnergyCoefficients {
        self.coefficients
    }

    fn adjacent(&self, i: usize, j: usize) -> bool {
        i != j
            && self.adjacency.has_edge(
                connectivity::node(&self.adjacency, i),
                connectivity::node(&self.adjacency, j),
            )
    }

    // =========================================================================
    // Edge Operations
    // =========================================================================

    /// Add an edge. Self-loops and existing edges are ignored.
    pub fn add_edge(&mut self, i: usize, j: usize) -> Result<()> {
        self.check_index(i)?;
        self.check_index(j)?;
        if i == j || self.adjacent(i, j) {
            return Ok(());
        }

        let (a, b) = (
            connectivity::node(&self.adjacency, i),
            connectivity::node(&self.adjacency, j),
        );
        self.adjacency.add_edge(a, b, ());
        self.vertices[i].degree += 1;
        self.vertices[j].degree += 1;
        debug!(a = %VertexId(i), b = %VertexId(j), "edge added");

        self.recalculate_vertex(i);
        self.recalculate_vertex(j);
        self.update_tree_state();
        Ok(())
    }

    /// Delete an edge. Self-loops and missing edges are ignored.
    pub fn delete_edge(&mut self, i: usize, j: usize) -> Result<()> {
        self.check_index(i)?;
        self.check_index(j)?;
        if i == j || !self.adjacent(i, j) {
            return Ok(());
        }

        let (a, b) = (
            connectivity::node(&self.adjacency, i),
            connectivity::node(&self.adjacency, j),
        );
        self.adjacency.remove_edge(a, b);
        self.vertices[i].degree -= 1;
        self.vertices[j].degree -= 1;
        debug!(a = %VertexId(i), b = %VertexId(j), "edge deleted");

        self.recalculate_vertex(i);
        self.recalculate_vertex(j);
        self.update_tree_state();
        Ok(())
    }

    /// Total degree over all vertices, halved.
    pub fn n_edges(&self) -> u32 {
        self.vertices.iter().map(|v| v.degree).sum::<u32>() / 2
    }

    // =========================================================================
    // Coordinates
    // =========================================================================

    /// Move vertex `i`. Topology is unchanged, so the tree flag is kept.
    pub fn set_coords(&mut self, i: usize, x: f64, y: f64) -> Result<()> {
        self.check_index(i)?;
        let v = &mut self.vertices[i];
        v.x = x;
        v.y = y;
        self.recalculate_vertex(i);
        Ok(())
    }

    // =========================================================================
    // Connectivity
    // =========================================================================

    /// Number of hidden vertices (with zero degree).
    pub fn count_hidden_vertices(&self) -> u32 {
        connectivity::count_hidden_vertices(&self.vertices)
    }

    /// Number of connected components among visible vertices.
    pub fn number_of_components(&self) -> u32 {
        connectivity::number_of_components(&self.adjacency, &self.vertices)
    }

    fn update_tree_state(&mut self) {
        let is_tree = connectivity::is_tree(&self.adjacency, &self.vertices, self.n_edges());
        if is_tree != self.is_tree {
            debug!(is_tree, "tree mode changed");
        }
        self.is_tree = is_tree;
    }

    // =========================================================================
    // Energy
    // =========================================================================

    /// Replace both coefficients and resynchronize the cache.
    pub fn set_coefficients(&mut self, coefficients: EnergyCoefficients) {
        debug!(
            vertex_repel = coefficients.vertex_repel,
            edge_attract = coefficients.edge_attract,
            "energy coefficients changed"
        );
        self.coefficients = coefficients;
        self.reset_weight();
    }

    pub fn set_vertex_repel_coeff(&mut self, c: f64) {
        self.set_coefficients(EnergyCoefficients {
            vertex_repel: c,
            ..self.coefficients
        });
    }

    pub fn set_edge_attract_coeff(&mut self, c: f64) {
        self.set_coefficients(EnergyCoefficients {
            edge_attract: c,
            ..self.coefficients
        });
    }

    /// Recompute every pair energy and the total from scratch.
    ///
    /// Clears floating-point drift accumulated by incremental updates.
    pub fn reset_weight(&mut self) {
        for i in 0..self.vertices.len() {
            self.recalculate_vertex(i);
        }
        let drifted = self.total_energy;
        self.total_energy = self.recomputed_total_energy();
        debug!(
            total = self.total_energy,
            drift = drifted - self.total_energy,
            "pair energies reset"
        );
    }

    /// Plain sum of the pair energy cache.
    pub fn recomputed_total_energy(&self) -> f64 {
        self.pair_energy.iter().sum()
    }

    /// Refresh the cached energies of every pair involving `i`.
    fn recalculate_vertex(&mut self, i: usize) {
        let n = self.vertices.len();
        for j in 0..n {
            if i == j {
                continue;
            }
            let (ij, ji) = (i * n + j, j * n + i);
            self.total_energy -= self.pair_energy[ij] + self.pair_energy[ji];

            let w = energy::pair_energy(
                &self.vertices[i],
                &self.vertices[j],
                self.adjacent(i, j),
                &self.coefficients,
            );
            self.pair_energy[ij] = w;
            self.pair_energy[ji] = w;
            self.total_energy += 2.0 * w;
        }
    }

    // =========================================================================
    // Invariant Checks
    // =========================================================================

    /// Every maintained degree equals the popcount of its adjacency row.
    pub fn degree_invariant_holds(&self) -> bool {
        let n = self.vertices.len();
        (0..n).all(|i| {
            let row = (0..n).filter(|&j| self.adjacent(i, j)).count() as u32;
            row == self.vertices[i].degree
        })
    }
}
