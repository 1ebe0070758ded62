//! Great-circle distances between airports.

use crate::domain::{AirportCode, Coordinates};
use crate::graph::AirportGraph;

/// Earth radius used for all distance estimates, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6378.0;

/// Haversine distance between two points given in degrees.
pub fn great_circle_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Distance between two coordinate pairs.
pub fn distance_between(a: &Coordinates, b: &Coordinates) -> f64 {
    great_circle_km(a.latitude(), a.longitude(), b.latitude(), b.longitude())
}

/// Lower-bound estimate of the remaining distance from `from` to `to`.
///
/// Falls back to 0 when either airport is unknown or has no usable
/// coordinates, which keeps the estimate admissible.
pub fn heuristic_km(graph: &AirportGraph, from: &AirportCode, to: &AirportCode) -> f64 {
    let from = graph.info(from).and_then(|a| a.coordinates);
    let to = graph.info(to).and_then(|a| a.coordinates);

    match (from, to) {
        (Some(a), Some(b)) => distance_between(&a, &b),
        _ => 0.0,
    }
}
