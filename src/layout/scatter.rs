//! Random initial placement.

use rand::Rng;
use tracing::debug;

use crate::error::{GraphError, Result};
use crate::geometry::Bounds;
use crate::graph::EnergyGraph;

/// Place every vertex slot, hidden ones included, uniformly inside `bounds`.
pub fn scatter<R: Rng>(graph: &mut EnergyGraph, bounds: &Bounds, rng: &mut R) -> Result<()> {
    if !(bounds.min_x <= bounds.max_x && bounds.min_y <= bounds.max_y) {
        return Err(GraphError::InvalidConfig(format!(
            "cannot scatter into empty bounds {bounds:?}"
        )));
    }

    for i in 0..graph.vertex_count() {
        let x = rng.gen_range(bounds.min_x..=bounds.max_x);
        let y = rng.gen_range(bounds.min_y..=bounds.max_y);
        graph.set_coords(i, x, y)?;
    }
    debug!(vertices = graph.vertex_count(), "vertices scattered");
    Ok(())
}
