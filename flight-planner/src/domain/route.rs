//! Directed flight segments.

use super::AirportCode;

/// A directed, point-to-point flight segment.
///
/// The origin is implied by the adjacency list the route is stored in.
/// Parallel routes between the same pair are distinct edges.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Arrival airport.
    pub destination: AirportCode,
    /// Great-circle or published distance in kilometres (non-negative).
    pub distance_km: f64,
    /// Scheduled block time in minutes.
    pub duration_min: u32,
    /// Operating carriers. Informational only.
    pub carriers: Vec<String>,
}

impl Route {
    /// Create a route. Negative or non-finite distances are clamped to zero.
    pub fn new(
        destination: AirportCode,
        distance_km: f64,
        duration_min: u32,
        carriers: Vec<String>,
    ) -> Self {
        let distance_km = if distance_km.is_finite() {
            distance_km.max(0.0)
        } else {
            0.0
        };
        Self {
            destination,
            distance_km,
            duration_min,
            carriers,
        }
    }
}
