//! Connectivity analysis over the visible part of the graph.
//!
//! Hidden (zero-degree) vertices are isolated in the adjacency matrix, so a
//! flood fill started only from visible vertices never reaches them and they
//! never start a component of their own.

use petgraph::matrix_graph::UnMatrix;
use petgraph::visit::{Dfs, GraphBase, NodeIndexable, VisitMap};

use super::vertex::Vertex;

/// Undirected adjacency matrix. Node weights and edge weights are unused;
/// slot `i` of the matrix is vertex `i` of the graph.
pub(crate) type Adjacency = UnMatrix<(), ()>;

pub(crate) type AdjacencyNode = <Adjacency as GraphBase>::NodeId;

/// Matrix node for a vertex slot.
#[inline]
pub(crate) fn node(adjacency: &Adjacency, index: usize) -> AdjacencyNode {
    NodeIndexable::from_index(adjacency, index)
}

/// Number of vertices with degree zero.
pub fn count_hidden_vertices(vertices: &[Vertex]) -> u32 {
    vertices.iter().filter(|v| v.is_hidden()).count() as u32
}

/// Number of connected components among visible vertices.
pub(crate) fn number_of_components(adjacency: &Adjacency, vertices: &[Vertex]) -> u32 {
    let mut dfs = Dfs::empty(adjacency);
    let mut count = 0;

    for (i, vertex) in vertices.iter().enumerate() {
        if vertex.is_hidden() {
            continue;
        }
        let start = node(adjacency, i);
        if dfs.discovered.is_visited(&start) {
            continue;
        }

        count += 1;
        // move_to keeps the discovered set, so earlier components stay marked
        dfs.move_to(start);
        while dfs.next(adjacency).is_some() {}
    }

    count
}

/// Tree classification: the visible subgraph is connected and has exactly
/// one edge fewer than it has vertices. No visible vertices is not a tree.
pub(crate) fn is_tree(adjacency: &Adjacency, vertices: &[Vertex], n_edges: u32) -> bool {
    let visible = vertices.len() as u32 - count_hidden_vertices(vertices);
    visible > 0 && n_edges + 1 == visible && number_of_components(adjacency, vertices) == 1
}
