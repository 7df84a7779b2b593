//! Pairwise energy model.
//!
//! Every pair of visible vertices repels with energy `repel / distance`;
//! pairs joined by an edge additionally attract with `attract * ln(distance)`.
//! Both terms are guarded so that coincident points never divide by zero and
//! `ln(0)` is never evaluated.

use serde::{Deserialize, Serialize};

use super::vertex::Vertex;

/// Distance tolerance used by the coincident-point guard.
pub const EPSILON: f64 = 1e-5;

/// Energy assigned to a pair whose L1 distance is below `2 * EPSILON`.
pub const COINCIDENT_ENERGY: f64 = 1e9;

/// Scalar coefficients of the energy model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyCoefficients {
    /// Numerator of the inverse-distance repulsion term.
    pub vertex_repel: f64,
    /// Multiplier of the logarithmic attraction term.
    pub edge_attract: f64,
}

impl Default for EnergyCoefficients {
    fn default() -> Self {
        Self {
            vertex_repel: 500.0,
            edge_attract: 1.0,
        }
    }
}

/// Repulsion energy between two vertices. Smaller for distant vertices.
///
/// Hidden vertices contribute nothing.
pub fn vertex_repel(a: &Vertex, b: &Vertex, coeffs: &EnergyCoefficients) -> f64 {
    if a.is_hidden() || b.is_hidden() {
        return 0.0;
    }
    if a.l1_distance(b) < 2.0 * EPSILON {
        return COINCIDENT_ENERGY;
    }
    coeffs.vertex_repel / a.distance(b)
}

/// Attraction energy along an edge. Smaller for close vertices.
pub fn edge_attract(a: &Vertex, b: &Vertex, coeffs: &EnergyCoefficients) -> f64 {
    let dist = a.distance(b);
    if dist > 0.0 {
        coeffs.edge_attract * dist.ln()
    } else {
        0.0
    }
}

/// Cached energy of one vertex pair.
pub fn pair_energy(a: &Vertex, b: &Vertex, adjacent: bool, coeffs: &EnergyCoefficients) -> f64 {
    if a.is_hidden() || b.is_hidden() {
        return 0.0;
    }
    let attraction = if adjacent {
        edge_attract(a, b, coeffs)
    } else {
        0.0
    };
    vertex_repel(a, b, coeffs) + attraction
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visible(x: f64, y: f64) -> Vertex {
        Vertex { x, y, degree: 1 }
    }

    #[test]
    fn test_repel_inverse_distance() {
        let c = EnergyCoefficients::default();
        let e = vertex_repel(&visible(0.0, 0.0), &visible(3.0, 4.0), &c);
        assert!((e - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_repel_coincident_sentinel() {
        let c = EnergyCoefficients::default();
        assert_eq!(
            vertex_repel(&visible(10.0, 10.0), &visible(10.0, 10.0), &c),
            COINCIDENT_ENERGY
        );
        // L1 distance just under 2 * EPSILON still counts as coincident.
        assert_eq!(
            vertex_repel(&visible(10.0, 10.0), &visible(10.0 + 1e-5, 10.0 + 0.9e-5), &c),
            COINCIDENT_ENERGY
        );
    }

    #[test]
    fn test_repel_hidden_is_zero() {
        let c = EnergyCoefficients::default();
        let hidden = Vertex::default();
        assert_eq!(vertex_repel(&hidden, &visible(1.0, 1.0), &c), 0.0);
        assert_eq!(pair_energy(&hidden, &visible(1.0, 1.0), true, &c), 0.0);
    }

    #[test]
    fn test_attract_zero_distance() {
        let c = EnergyCoefficients::default();
        let e = edge_attract(&visible(5.0, 5.0), &visible(5.0, 5.0), &c);
        assert_eq!(e, 0.0);
        assert!(e.is_finite());
    }

    #[test]
    fn test_attract_logarithmic() {
        let c = EnergyCoefficients {
            vertex_repel: 500.0,
            edge_attract: 2.0,
        };
        let e = edge_attract(&visible(0.0, 0.0), &visible(0.0, std::f64::consts::E), &c);
        assert!((e - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_pair_energy_adds_attraction_only_for_edges() {
        let c = EnergyCoefficients::default();
        let a = visible(0.0, 0.0);
        let b = visible(10.0, 0.0);
        let free = pair_energy(&a, &b, false, &c);
        let joined = pair_energy(&a, &b, true, &c);
        assert!((free - 50.0).abs() < 1e-12);
        assert!((joined - (50.0 + 10f64.ln())).abs() < 1e-12);
    }
}
