//! Energy Layout - WASM Module
//!
//! This module provides the graph energy model and the incremental layout
//! optimizer behind an energy-based graph drawing surface. It is compiled to
//! WebAssembly and exposes a JavaScript-friendly API via wasm-bindgen; the
//! rendering, input handling and animation loop live on the JS side.
//!
//! # Architecture
//!
//! - `graph`: Fixed-capacity energy graph with cached pair energies
//! - `layout`: Greedy single-vertex stepper, candidate rules, viewport
//! - `spatial`: R-tree spatial indexing for O(log n) hit testing
//! - `config`: Layout configuration, deserializable from JS
//! - `geometry`: Points and rectangles

use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod layout;
pub mod spatial;

pub use config::LayoutConfig;
pub use error::{GraphError, Result};
pub use geometry::{Bounds, Point};
pub use graph::{EnergyCoefficients, EnergyGraph, Vertex, VertexId};
pub use layout::{LayoutStepper, Viewport};

use spatial::SpatialIndex;

/// Seed used until the caller scatters with a seed of its own.
const DEFAULT_SEED: u64 = 0x5eed;

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    web_sys::console::debug_1(&JsValue::from_str("energy-layout: module initialized"));
}

/// Main entry point for the layout engine.
///
/// This struct wraps the internal EnergyGraph together with the stepper and
/// viewport it is laid out in, and provides the public API exposed to
/// JavaScript. Vertex indices arrive as signed integers; anything outside
/// `0..vertexCount` is rejected with an error.
#[wasm_bindgen]
pub struct EnergyLayoutWasm {
    graph: EnergyGraph,
    stepper: LayoutStepper,
    viewport: Viewport,
    rng: SmallRng,
    spatial: SpatialIndex,
    spatial_dirty: bool,
}

impl EnergyLayoutWasm {
    /// Build a layout from an already parsed configuration.
    pub fn from_config(vertex_count: usize, config: &LayoutConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            graph: EnergyGraph::with_coefficients(vertex_count, config.coefficients()),
            stepper: LayoutStepper::from_config(config),
            viewport: config.viewport(),
            rng: SmallRng::seed_from_u64(DEFAULT_SEED),
            spatial: SpatialIndex::new(),
            spatial_dirty: true,
        })
    }

    pub fn graph(&self) -> &EnergyGraph {
        &self.graph
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    fn index(&self, raw: i32) -> Result<usize> {
        self.graph.resolve_index(i64::from(raw))
    }

    fn spatial_index(&mut self) -> &SpatialIndex {
        if self.spatial_dirty {
            self.spatial.rebuild(&self.graph);
            self.spatial_dirty = false;
        }
        &self.spatial
    }
}

#[wasm_bindgen]
impl EnergyLayoutWasm {
    /// Create a layout with `vertex_count` hidden vertices and default settings.
    #[wasm_bindgen(constructor)]
    pub fn new(vertex_count: usize) -> Self {
        Self {
            graph: EnergyGraph::new(vertex_count),
            stepper: LayoutStepper::default(),
            viewport: LayoutConfig::default().viewport(),
            rng: SmallRng::seed_from_u64(DEFAULT_SEED),
            spatial: SpatialIndex::new(),
            spatial_dirty: true,
        }
    }

    /// Create a layout from a configuration object.
    ///
    /// Accepts `{ width, height, margin, step, leafTolerance, arcAngle,
    /// vertexRepelCoeff, edgeAttractCoeff }`; missing keys take defaults.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(vertex_count: usize, config: JsValue) -> std::result::Result<EnergyLayoutWasm, JsError> {
        let config: LayoutConfig = if config.is_undefined() || config.is_null() {
            LayoutConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(|e| JsError::new(&e.to_string()))?
        };
        Ok(Self::from_config(vertex_count, &config)?)
    }

    // =========================================================================
    // Vertex Access
    // =========================================================================

    /// Get the number of vertex slots.
    #[wasm_bindgen(js_name = vertexCount)]
    pub fn vertex_count(&self) -> usize {
        self.graph.vertex_count()
    }

    /// Check whether an index names a vertex slot.
    #[wasm_bindgen(js_name = inBounds)]
    pub fn in_bounds(&self, vertex: i32) -> bool {
        self.graph.in_bounds(i64::from(vertex))
    }

    /// Get a vertex's X position.
    #[wasm_bindgen(js_name = getX)]
    pub fn get_x(&self, vertex: i32) -> std::result::Result<f64, JsError> {
        Ok(self.graph.vertex(self.index(vertex)?)?.x)
    }

    /// Get a vertex's Y position.
    #[wasm_bindgen(js_name = getY)]
    pub fn get_y(&self, vertex: i32) -> std::result::Result<f64, JsError> {
        Ok(self.graph.vertex(self.index(vertex)?)?.y)
    }

    /// Get a vertex's degree. Zero means the vertex is hidden.
    #[wasm_bindgen(js_name = getDegree)]
    pub fn get_degree(&self, vertex: i32) -> std::result::Result<u32, JsError> {
        Ok(self.graph.degree(self.index(vertex)?)?)
    }

    /// Set a vertex's position.
    #[wasm_bindgen(js_name = setCoords)]
    pub fn set_coords(&mut self, vertex: i32, x: f64, y: f64) -> std::result::Result<(), JsError> {
        let i = self.index(vertex)?;
        self.graph.set_coords(i, x, y)?;
        self.spatial_dirty = true;
        Ok(())
    }

    /// Get all positions as [x0, y0, x1, y1, ...], hidden slots included.
    #[wasm_bindgen(js_name = getPositions)]
    pub fn get_positions(&self) -> Vec<f64> {
        self.graph
            .vertices()
            .iter()
            .flat_map(|v| [v.x, v.y])
            .collect()
    }

    /// Get all degrees, one per slot.
    #[wasm_bindgen(js_name = getDegrees)]
    pub fn get_degrees(&self) -> Vec<u32> {
        self.graph.vertices().iter().map(|v| v.degree()).collect()
    }

    // =========================================================================
    // Edge Operations
    // =========================================================================

    /// Add an edge. Self-loops and existing edges are ignored.
    #[wasm_bindgen(js_name = addEdge)]
    pub fn add_edge(&mut self, a: i32, b: i32) -> std::result::Result<(), JsError> {
        let (i, j) = (self.index(a)?, self.index(b)?);
        self.graph.add_edge(i, j)?;
        self.spatial_dirty = true;
        Ok(())
    }

    /// Delete an edge. Missing edges are ignored.
    #[wasm_bindgen(js_name = deleteEdge)]
    pub fn delete_edge(&mut self, a: i32, b: i32) -> std::result::Result<(), JsError> {
        let (i, j) = (self.index(a)?, self.index(b)?);
        self.graph.delete_edge(i, j)?;
        self.spatial_dirty = true;
        Ok(())
    }

    /// Check whether an edge joins two vertices.
    #[wasm_bindgen(js_name = hasEdge)]
    pub fn has_edge(&self, a: i32, b: i32) -> std::result::Result<bool, JsError> {
        Ok(self.graph.has_edge(self.index(a)?, self.index(b)?)?)
    }

    /// Get the number of edges.
    #[wasm_bindgen(js_name = edgeCount)]
    pub fn edge_count(&self) -> u32 {
        self.graph.n_edges()
    }

    // =========================================================================
    // Graph State
    // =========================================================================

    /// Current total energy of the layout.
    #[wasm_bindgen(js_name = totalEnergy)]
    pub fn total_energy(&self) -> f64 {
        self.graph.total_energy()
    }

    /// Whether the visible graph is a tree (radial leaf placement active).
    #[wasm_bindgen(js_name = isTree)]
    pub fn is_tree(&self) -> bool {
        self.graph.is_tree()
    }

    #[wasm_bindgen(js_name = countHiddenVertices)]
    pub fn count_hidden_vertices(&self) -> u32 {
        self.graph.count_hidden_vertices()
    }

    #[wasm_bindgen(js_name = numberOfComponents)]
    pub fn number_of_components(&self) -> u32 {
        self.graph.number_of_components()
    }

    // =========================================================================
    // Energy Coefficients
    // =========================================================================

    #[wasm_bindgen(js_name = setVertexRepelCoeff)]
    pub fn set_vertex_repel_coeff(&mut self, c: f64) {
        self.graph.set_vertex_repel_coeff(c);
    }

    #[wasm_bindgen(js_name = setEdgeAttractCoeff)]
    pub fn set_edge_attract_coeff(&mut self, c: f64) {
        self.graph.set_edge_attract_coeff(c);
    }

    /// Recompute all cached energies from scratch.
    #[wasm_bindgen(js_name = resetWeight)]
    pub fn reset_weight(&mut self) {
        self.graph.reset_weight();
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Run one greedy step on a vertex.
    ///
    /// Returns the vertex's new position as [x, y].
    pub fn advance(&mut self, vertex: i32) -> std::result::Result<Vec<f64>, JsError> {
        let i = self.index(vertex)?;
        let p = self.stepper.advance(&mut self.graph, i, &self.viewport)?;
        self.spatial_dirty = true;
        Ok(vec![p.x, p.y])
    }

    /// Run one greedy step on a randomly chosen vertex.
    ///
    /// Returns the chosen vertex, or None for an empty graph.
    pub fn tick(&mut self) -> std::result::Result<Option<u32>, JsError> {
        let moved = self
            .stepper
            .advance_random(&mut self.graph, &self.viewport, &mut self.rng)?;
        self.spatial_dirty = true;
        Ok(moved.map(|(id, _)| id.index() as u32))
    }

    /// Run one greedy step on every vertex, in index order.
    pub fn sweep(&mut self) -> std::result::Result<(), JsError> {
        self.stepper.sweep(&mut self.graph, &self.viewport)?;
        self.spatial_dirty = true;
        Ok(())
    }

    /// Place every vertex at a random position inside the margins.
    ///
    /// The seed also reseeds the generator used by `tick`. Without a seed
    /// one is drawn from `Math.random()`.
    pub fn scatter(&mut self, seed: Option<u64>) -> std::result::Result<(), JsError> {
        let seed = seed.unwrap_or_else(|| (js_sys::Math::random() * u64::MAX as f64) as u64);
        self.rng = SmallRng::seed_from_u64(seed);
        layout::scatter(&mut self.graph, &self.viewport.bounds, &mut self.rng)?;
        self.spatial_dirty = true;
        Ok(())
    }

    // =========================================================================
    // Spatial Queries
    // =========================================================================

    /// Find the visible vertex nearest to a point.
    #[wasm_bindgen(js_name = findNearestVertex)]
    pub fn find_nearest_vertex(&mut self, x: f64, y: f64) -> Option<u32> {
        self.spatial_index()
            .nearest(Point::new(x, y))
            .map(|id| id.index() as u32)
    }

    /// Find the nearest visible vertex within a maximum distance.
    #[wasm_bindgen(js_name = findNearestVertexWithin)]
    pub fn find_nearest_vertex_within(&mut self, x: f64, y: f64, max_distance: f64) -> Option<u32> {
        self.spatial_index()
            .nearest_within(Point::new(x, y), max_distance)
            .map(|id| id.index() as u32)
    }

    /// Find all visible vertices in a rectangle.
    #[wasm_bindgen(js_name = findVerticesInRect)]
    pub fn find_vertices_in_rect(&mut self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Vec<u32> {
        self.spatial_index()
            .in_bounds(&Bounds::new(min_x, min_y, max_x, max_y))
            .into_iter()
            .map(|id| id.index() as u32)
            .collect()
    }
}
