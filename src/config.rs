//! Layout configuration.
//!
//! A single plain struct with defaults for an 800x600 window. It can be built
//! in Rust or deserialized from a JS object (camelCase keys, every key
//! optional) at the wasm boundary.

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};
use crate::graph::EnergyCoefficients;
use crate::layout::Viewport;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Window width (default: 800).
    pub width: f64,
    /// Window height (default: 600).
    pub height: f64,
    /// Clearance kept free on every side of the window (default: 50).
    pub margin: f64,
    /// Length of an orthogonal move (default: 1).
    pub step: f64,
    /// Slack around the leaf circle in tree mode (default: 1).
    pub leaf_tolerance: f64,
    /// Arc move angle in radians (default: 0.001).
    pub arc_angle: f64,
    /// Repulsion coefficient (default: 500).
    pub vertex_repel_coeff: f64,
    /// Attraction coefficient (default: 1).
    pub edge_attract_coeff: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let coefficients = EnergyCoefficients::default();
        Self {
            width: 800.0,
            height: 600.0,
            margin: 50.0,
            step: 1.0,
            leaf_tolerance: 1.0,
            arc_angle: 0.001,
            vertex_repel_coeff: coefficients.vertex_repel,
            edge_attract_coeff: coefficients.edge_attract,
        }
    }
}

impl LayoutConfig {
    pub fn viewport(&self) -> Viewport {
        Viewport::from_window(self.width, self.height, self.margin)
    }

    pub fn coefficients(&self) -> EnergyCoefficients {
        EnergyCoefficients {
            vertex_repel: self.vertex_repel_coeff,
            edge_attract: self.edge_attract_coeff,
        }
    }

    /// Reject geometry the stepper cannot work with.
    pub fn validate(&self) -> Result<()> {
        let finite = [
            ("width", self.width),
            ("height", self.height),
            ("margin", self.margin),
            ("step", self.step),
            ("leafTolerance", self.leaf_tolerance),
            ("arcAngle", self.arc_angle),
            ("vertexRepelCoeff", self.vertex_repel_coeff),
            ("edgeAttractCoeff", self.edge_attract_coeff),
        ];
        if let Some((name, value)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(GraphError::InvalidConfig(format!("{name} must be finite, got {value}")));
        }

        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(GraphError::InvalidConfig(format!(
                "window must have positive size, got {}x{}",
                self.width, self.height
            )));
        }
        if self.margin < 0.0 || 2.0 * self.margin > self.width.min(self.height) {
            return Err(GraphError::InvalidConfig(format!(
                "margin {} does not fit a {}x{} window",
                self.margin, self.width, self.height
            )));
        }
        if self.step <= 0.0 {
            return Err(GraphError::InvalidConfig(format!("step must be positive, got {}", self.step)));
        }
        if self.leaf_tolerance < 0.0 {
            return Err(GraphError::InvalidConfig(format!(
                "leafTolerance must not be negative, got {}",
                self.leaf_tolerance
            )));
        }
        Ok(())
    }
}
