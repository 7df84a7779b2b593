//! Candidate move generation.
//!
//! A free graph gets the zero offset plus four axis-aligned steps, clipped to
//! the viewport bounds. In tree mode the vertex is first pulled inside the
//! leaf circle, leaves are then pushed out to the circle, and leaves on the
//! circle may only slide along it.

use crate::geometry::{Bounds, Point};
use crate::graph::Vertex;

use super::viewport::Viewport;

/// Which rule produced a candidate set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// Zero offset and axis-aligned steps inside the bounds.
    Orthogonal,
    /// Single unit step toward the center (vertex outside the leaf circle).
    Inward,
    /// Single unit step away from the center (leaf inside the leaf circle).
    Outward,
    /// Zero offset and small rotations around the center (leaf on the circle).
    Arc,
}

/// Offsets to try for one vertex, in evaluation order.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidates {
    pub kind: MoveKind,
    pub offsets: Vec<Point>,
}

/// Tuning for candidate generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionParams {
    /// Length of an orthogonal step.
    pub step: f64,
    /// Slack around the leaf circle before inward/outward moves kick in.
    pub leaf_tolerance: f64,
    /// Rotation angle of arc moves, in radians.
    pub arc_angle: f64,
}

impl Default for DirectionParams {
    fn default() -> Self {
        Self {
            step: 1.0,
            leaf_tolerance: 1.0,
            arc_angle: 0.001,
        }
    }
}

/// Zero offset and the four axis-aligned steps that stay inside `bounds`.
pub fn orthogonal(position: Point, step: f64, bounds: &Bounds) -> Vec<Point> {
    [
        Point::ZERO,
        Point::new(step, 0.0),
        Point::new(0.0, step),
        Point::new(-step, 0.0),
        Point::new(0.0, -step),
    ]
    .into_iter()
    .filter(|&d| bounds.contains(position + d))
    .collect()
}

/// Zero offset and the offsets that rotate `position` by `-angle` and
/// `+angle` around `center`.
pub fn arc(position: Point, center: Point, angle: f64) -> Vec<Point> {
    vec![
        Point::ZERO,
        position.rotate_around(center, -angle) - position,
        position.rotate_around(center, angle) - position,
    ]
}

pub fn possible_directions(
    vertex: &Vertex,
    is_tree: bool,
    viewport: &Viewport,
    params: &DirectionParams,
) -> Candidates {
    let position = vertex.position();

    if is_tree {
        let from_center = position - viewport.center;
        let dist = from_center.length();
        // Undefined on the center itself; any direction will do there.
        let outward = from_center.unit().unwrap_or(Point::new(1.0, 0.0));

        if dist - viewport.leaf_radius > params.leaf_tolerance {
            return Candidates {
                kind: MoveKind::Inward,
                offsets: vec![-outward],
            };
        }
        if vertex.is_leaf() && viewport.leaf_radius - dist > params.leaf_tolerance {
            return Candidates {
                kind: MoveKind::Outward,
                offsets: vec![outward],
            };
        }
        if vertex.is_leaf() {
            return Candidates {
                kind: MoveKind::Arc,
                offsets: arc(position, viewport.center, params.arc_angle),
            };
        }
    }

    Candidates {
        kind: MoveKind::Orthogonal,
        offsets: orthogonal(position, params.step, &viewport.bounds),
    }
}
