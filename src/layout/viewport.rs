//! The drawing area the layout stepper works inside.

use serde::{Deserialize, Serialize};

use crate::geometry::{Bounds, Point};

/// Where vertices may move and where the leaf circle sits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Orthogonal moves must keep the vertex inside these bounds.
    pub bounds: Bounds,
    /// Center of the leaf circle used in tree mode.
    pub center: Point,
    /// Radius of the leaf circle.
    pub leaf_radius: f64,
}

impl Viewport {
    /// Viewport for a `width` x `height` window with `margin` kept clear on
    /// every side. The leaf circle is centered and touches the margin of the
    /// shorter side.
    pub fn from_window(width: f64, height: f64, margin: f64) -> Self {
        Self {
            bounds: Bounds::new(margin, margin, width - margin, height - margin),
            center: Point::new(width / 2.0, height / 2.0),
            leaf_radius: width.min(height) / 2.0 - margin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_window() {
        let vp = Viewport::from_window(800.0, 600.0, 50.0);
        assert_eq!(vp.bounds, Bounds::new(50.0, 50.0, 750.0, 550.0));
        assert_eq!(vp.center, Point::new(400.0, 300.0));
        assert_eq!(vp.leaf_radius, 250.0);
    }

    #[test]
    fn test_leaf_circle_fits_bounds() {
        let vp = Viewport::from_window(300.0, 900.0, 20.0);
        assert_eq!(vp.leaf_radius, 130.0);
        assert!(vp.bounds.contains(vp.center + Point::new(vp.leaf_radius, 0.0)));
        assert!(vp.bounds.contains(vp.center - Point::new(vp.leaf_radius, 0.0)));
    }
}
