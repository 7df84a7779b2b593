//! Layout algorithms for graph visualization.
//!
//! This module provides the greedy energy-descent stepper that moves one
//! vertex at a time, the candidate rules it chooses from, and helpers for
//! the viewport it works in and for random initial placement.

pub mod directions;
pub mod scatter;
pub mod stepper;
pub mod viewport;

pub use directions::{Candidates, DirectionParams, MoveKind};
pub use scatter::scatter;
pub use stepper::LayoutStepper;
pub use viewport::Viewport;
