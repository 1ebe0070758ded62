//! Bounded breadth-first path enumeration.
//!
//! Explores every simple path from the departure up to the stop budget.
//! The cost is exponential in the budget, which is fine for the small
//! budgets (two or three stops) that make sense for flights.

use std::collections::VecDeque;

use tracing::{debug, trace};

use super::config::Deadline;
use super::search::{SearchError, SearchRequest, priced_itinerary};
use crate::domain::{AirportCode, Itinerary};
use crate::graph::AirportGraph;

/// BFS state: a partial path ending at `airport`.
#[derive(Debug, Clone)]
struct PathState {
    airport: AirportCode,
    path: Vec<AirportCode>,
    distance_km: f64,
    duration_min: u32,
}

/// Result of enumeration: itineraries in discovery order.
pub(super) struct EnumerateResult {
    pub itineraries: Vec<Itinerary>,
    pub states_explored: usize,
}

/// Enumerate all simple paths from departure to destination with at most
/// `max_stops` intermediate airports.
///
/// A path is accepted as soon as it reaches the destination and is never
/// extended past it. Parallel routes yield separate itineraries. Results
/// come out in BFS order, so fewer stops come first.
pub(super) fn enumerate_paths(
    graph: &AirportGraph,
    request: &SearchRequest,
    deadline: Deadline,
) -> Result<EnumerateResult, SearchError> {
    let mut itineraries = Vec::new();
    let mut states_explored = 0;

    // No path of two or more airports can start and end at the same place
    // without revisiting it.
    if request.departure == request.destination {
        return Ok(EnumerateResult {
            itineraries,
            states_explored,
        });
    }

    let max_len = request.max_stops + 2;

    let mut queue: VecDeque<PathState> = VecDeque::new();
    queue.push_back(PathState {
        airport: request.departure,
        path: vec![request.departure],
        distance_km: 0.0,
        duration_min: 0,
    });

    while let Some(state) = queue.pop_front() {
        if deadline.expired() {
            debug!(states_explored, "Enumeration exceeded its time budget");
            return Err(SearchError::Timeout);
        }
        states_explored += 1;

        if state.airport == request.destination && state.path.len() >= 2 {
            if let Some(itinerary) = priced_itinerary(
                state.path,
                state.distance_km,
                state.duration_min,
                request.cabin,
            ) {
                itineraries.push(itinerary);
            }
            // Don't continue past the destination
            continue;
        }

        if state.path.len() >= max_len {
            continue;
        }

        for route in graph.routes_from(&state.airport) {
            if state.path.contains(&route.destination) {
                continue;
            }

            let mut path = state.path.clone();
            path.push(route.destination);

            queue.push_back(PathState {
                airport: route.destination,
                path,
                distance_km: state.distance_km + route.distance_km,
                duration_min: state.duration_min.saturating_add(route.duration_min),
            });
        }

        trace!(
            airport = %state.airport,
            depth = state.path.len(),
            queued = queue.len(),
            "Expanded airport"
        );
    }

    debug!(
        departure = %request.departure,
        destination = %request.destination,
        itineraries = itineraries.len(),
        states_explored,
        "Enumeration complete"
    );

    Ok(EnumerateResult {
        itineraries,
        states_explored,
    })
}
