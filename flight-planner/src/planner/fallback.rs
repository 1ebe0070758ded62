//! Neighbour fallback.
//!
//! When nothing reaches the destination within the stop budget, offer direct
//! flights from the departure into the destination's country instead.

use tracing::debug;

use crate::domain::{AirportCode, Cabin, Itinerary, Provenance};
use crate::graph::AirportGraph;
use crate::pricing::fallback_price;

/// Direct flights from `departure` to any airport in the same country as
/// `destination`.
///
/// Candidates without usable coordinates are left out. Each parallel route
/// gives its own suggestion. Fallback fares ignore the cabin multiplier.
pub(super) fn neighbour_fallback(
    graph: &AirportGraph,
    departure: &AirportCode,
    destination: &AirportCode,
    cabin: Cabin,
) -> Vec<Itinerary> {
    let Some(target) = graph.info(destination) else {
        debug!(%destination, "Destination unknown, no fallback possible");
        return Vec::new();
    };

    let suggestions: Vec<Itinerary> = graph
        .routes_from(departure)
        .iter()
        .filter(|route| {
            graph
                .info(&route.destination)
                .is_some_and(|a| a.coordinates.is_some() && a.same_country(target))
        })
        .filter_map(|route| {
            Itinerary::new(
                vec![*departure, route.destination],
                route.distance_km,
                route.duration_min,
                fallback_price(route.distance_km),
                cabin,
                Provenance::FallbackNeighbor,
            )
            .ok()
        })
        .collect();

    debug!(
        %departure,
        %destination,
        country = %target.country,
        suggestions = suggestions.len(),
        "Neighbour fallback"
    );

    suggestions
}
