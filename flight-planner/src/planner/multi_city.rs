//! Multi-city composition.
//!
//! A two-leg trip is the cross product of two one-way searches. The second
//! leg departs from wherever each first-leg itinerary actually ended, which
//! is not the requested middle airport when the first leg fell back.

use std::collections::HashMap;

use tracing::{debug, trace};

use super::search::{MultiCityRequest, SearchError, SearchRequest, SearchResult};
use crate::domain::{AirportCode, Itinerary};
use crate::pricing::round2;

/// Run `one_way` for both legs and join every pair of results.
pub(super) fn compose<F>(
    request: &MultiCityRequest,
    one_way: F,
) -> Result<SearchResult, SearchError>
where
    F: Fn(&SearchRequest) -> Result<SearchResult, SearchError>,
{
    let first = one_way(&request.first_leg())?;
    let mut states_explored = first.states_explored;

    // Fallback can land several first-leg itineraries on the same airport
    let mut second_legs: HashMap<AirportCode, Vec<Itinerary>> = HashMap::new();
    let mut itineraries = Vec::new();

    for leg1 in &first.itineraries {
        let terminal = *leg1.destination();
        if !second_legs.contains_key(&terminal) {
            let second = one_way(&request.second_leg(terminal))?;
            states_explored += second.states_explored;
            second_legs.insert(terminal, second.itineraries);
        }

        for leg2 in second_legs.get(&terminal).into_iter().flatten() {
            match join(leg1, leg2) {
                Some(joined) => itineraries.push(joined),
                None => trace!(
                    first = %leg1,
                    second = %leg2,
                    "Skipping combination that revisits an airport"
                ),
            }
        }
    }

    let used_fallback = itineraries.iter().any(Itinerary::is_fallback);

    debug!(
        departure = %request.departure,
        middle = %request.middle,
        destination = %request.destination,
        first_leg = first.itineraries.len(),
        itineraries = itineraries.len(),
        used_fallback,
        "Multi-city composition complete"
    );

    Ok(SearchResult {
        itineraries,
        used_fallback,
        states_explored,
    })
}

/// Concatenate two itineraries sharing a junction airport.
///
/// Returns `None` if the result would visit an airport twice.
fn join(first: &Itinerary, second: &Itinerary) -> Option<Itinerary> {
    let mut path = first.path().to_vec();
    path.extend_from_slice(&second.path()[1..]);

    Itinerary::new(
        path,
        first.distance_km() + second.distance_km(),
        first.duration_min().saturating_add(second.duration_min()),
        round2(first.price() + second.price()),
        first.cabin(),
        first.provenance().merge(second.provenance()),
    )
    .ok()
}
