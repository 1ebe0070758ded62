//! Route search entry points.
//!
//! [`Planner`] owns the one-way flow: run the selected strategy, and if it
//! finds nothing, degrade to neighbour fallback. Multi-city composition is
//! built on top of that flow.

use std::fmt;

use tracing::debug;

use crate::domain::{AirportCode, Cabin, Itinerary, Provenance};
use crate::graph::AirportGraph;
use crate::pricing;

use super::config::{Deadline, SearchConfig};
use super::enumerate::enumerate_paths;
use super::fallback::neighbour_fallback;
use super::informed::{Heuristic, best_first};
use super::multi_city::compose;

/// Error from route search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// Invalid search request
    #[error("invalid search request: {0}")]
    InvalidRequest(String),

    /// Search exceeded its time budget
    #[error("search timed out")]
    Timeout,
}

/// Error returned when parsing an unknown strategy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown search strategy: {0}")]
pub struct InvalidStrategy(pub String);

/// How a one-way search explores the graph.
///
/// The strategies are not interchangeable: enumeration returns every simple
/// path within the stop budget, informed search only the shortest one per
/// stop count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Exhaustive bounded breadth-first enumeration.
    #[default]
    Enumerate,
    /// Best-first search with the given heuristic.
    Informed(Heuristic),
}

impl Strategy {
    /// Parse a strategy name: `enumerate`, `astar` or `dijkstra`.
    pub fn parse(s: &str) -> Result<Self, InvalidStrategy> {
        match s.trim().to_ascii_lowercase().as_str() {
            "enumerate" | "bfs" => Ok(Strategy::Enumerate),
            "astar" | "a*" => Ok(Strategy::Informed(Heuristic::GreatCircle)),
            "dijkstra" => Ok(Strategy::Informed(Heuristic::Zero)),
            _ => Err(InvalidStrategy(s.to_string())),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Enumerate => f.write_str("enumerate"),
            Strategy::Informed(Heuristic::GreatCircle) => f.write_str("astar"),
            Strategy::Informed(Heuristic::Zero) => f.write_str("dijkstra"),
        }
    }
}

/// Request for a one-way search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub departure: AirportCode,
    pub destination: AirportCode,
    /// Maximum number of intermediate airports.
    pub max_stops: usize,
    pub cabin: Cabin,
}

impl SearchRequest {
    /// Create a new search request.
    pub fn new(
        departure: AirportCode,
        destination: AirportCode,
        max_stops: usize,
        cabin: Cabin,
    ) -> Self {
        Self {
            departure,
            destination,
            max_stops,
            cabin,
        }
    }

    /// Build a request from raw caller input.
    ///
    /// Codes are normalized; empty or malformed codes, negative stop counts
    /// and unknown cabins are rejected as invalid requests.
    pub fn parse(
        departure: &str,
        destination: &str,
        max_stops: i64,
        cabin: &str,
    ) -> Result<Self, SearchError> {
        Ok(Self {
            departure: parse_code("departure", departure)?,
            destination: parse_code("destination", destination)?,
            max_stops: parse_stops(max_stops)?,
            cabin: Cabin::parse(cabin).map_err(|e| SearchError::InvalidRequest(e.to_string()))?,
        })
    }

    /// Validate the request against the search limits.
    pub fn validate(&self, config: &SearchConfig) -> Result<(), SearchError> {
        if self.max_stops > config.max_stops_limit {
            return Err(SearchError::InvalidRequest(format!(
                "at most {} stops may be requested, got {}",
                config.max_stops_limit, self.max_stops
            )));
        }
        Ok(())
    }
}

/// Request for a two-leg multi-city search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiCityRequest {
    pub departure: AirportCode,
    pub middle: AirportCode,
    pub destination: AirportCode,
    /// Stop budget for each leg.
    pub max_stops: usize,
    pub cabin: Cabin,
}

impl MultiCityRequest {
    /// Create a new multi-city request.
    pub fn new(
        departure: AirportCode,
        middle: AirportCode,
        destination: AirportCode,
        max_stops: usize,
        cabin: Cabin,
    ) -> Self {
        Self {
            departure,
            middle,
            destination,
            max_stops,
            cabin,
        }
    }

    /// Build a request from raw caller input.
    pub fn parse(
        departure: &str,
        middle: &str,
        destination: &str,
        max_stops: i64,
        cabin: &str,
    ) -> Result<Self, SearchError> {
        let first = SearchRequest::parse(departure, middle, max_stops, cabin)?;
        Ok(Self {
            departure: first.departure,
            middle: first.destination,
            destination: parse_code("destination", destination)?,
            max_stops: first.max_stops,
            cabin: first.cabin,
        })
    }

    /// Request for the first leg, departure to middle.
    pub fn first_leg(&self) -> SearchRequest {
        SearchRequest::new(self.departure, self.middle, self.max_stops, self.cabin)
    }

    /// Request for the second leg, starting wherever the first leg ended.
    pub fn second_leg(&self, from: AirportCode) -> SearchRequest {
        SearchRequest::new(from, self.destination, self.max_stops, self.cabin)
    }

    /// Validate the request against the search limits.
    pub fn validate(&self, config: &SearchConfig) -> Result<(), SearchError> {
        self.first_leg().validate(config)
    }
}

fn parse_code(field: &str, value: &str) -> Result<AirportCode, SearchError> {
    AirportCode::parse_normalized(value)
        .map_err(|e| SearchError::InvalidRequest(format!("{field}: {e}")))
}

fn parse_stops(stops: i64) -> Result<usize, SearchError> {
    usize::try_from(stops).map_err(|_| {
        SearchError::InvalidRequest(format!("stops must not be negative, got {stops}"))
    })
}

/// Result of a search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Found itineraries, in discovery order.
    pub itineraries: Vec<Itinerary>,

    /// True if any itinerary came from neighbour fallback.
    pub used_fallback: bool,

    /// Number of search states examined.
    pub states_explored: usize,
}

impl SearchResult {
    /// Create an empty result.
    pub fn empty() -> Self {
        Self {
            itineraries: Vec::new(),
            used_fallback: false,
            states_explored: 0,
        }
    }

    /// Returns true if no itinerary is available.
    pub fn is_empty(&self) -> bool {
        self.itineraries.is_empty()
    }
}

/// Price a searched path and wrap it as a standard itinerary.
///
/// Returns `None` if the path violates an itinerary invariant.
pub(super) fn priced_itinerary(
    path: Vec<AirportCode>,
    distance_km: f64,
    duration_min: u32,
    cabin: Cabin,
) -> Option<Itinerary> {
    let stops = path.len().saturating_sub(2);
    let price = pricing::price(distance_km, stops, cabin);
    Itinerary::new(
        path,
        distance_km,
        duration_min,
        price,
        cabin,
        Provenance::Standard,
    )
    .ok()
}

/// Route planner over a borrowed graph.
pub struct Planner<'a> {
    graph: &'a AirportGraph,
    config: &'a SearchConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(graph: &'a AirportGraph, config: &'a SearchConfig) -> Self {
        Self { graph, config }
    }

    /// Enumerate every simple path within the stop budget.
    ///
    /// Does not fall back; an empty list means no path exists.
    pub fn enumerate(&self, request: &SearchRequest) -> Result<Vec<Itinerary>, SearchError> {
        request.validate(self.config)?;
        let result = enumerate_paths(self.graph, request, self.config.deadline())?;
        Ok(result.itineraries)
    }

    /// Find the shortest itinerary for each stop count within the budget.
    ///
    /// Does not fall back; an empty list means no path exists.
    pub fn search(
        &self,
        request: &SearchRequest,
        heuristic: Heuristic,
    ) -> Result<Vec<Itinerary>, SearchError> {
        request.validate(self.config)?;
        let result = best_first(self.graph, request, heuristic, self.config.deadline())?;
        Ok(result.itineraries)
    }

    /// Suggest direct flights to airports in the destination's country.
    pub fn fallback(
        &self,
        departure: &AirportCode,
        destination: &AirportCode,
        cabin: Cabin,
    ) -> Vec<Itinerary> {
        neighbour_fallback(self.graph, departure, destination, cabin)
    }

    /// One-way search with the given strategy, falling back to neighbouring
    /// airports when nothing satisfies the request.
    pub fn one_way(
        &self,
        request: &SearchRequest,
        strategy: Strategy,
    ) -> Result<SearchResult, SearchError> {
        request.validate(self.config)?;
        self.one_way_within(request, strategy, self.config.deadline())
    }

    /// Two one-way searches joined at the first leg's actual terminal.
    pub fn compose_multi_city(
        &self,
        request: &MultiCityRequest,
        strategy: Strategy,
    ) -> Result<SearchResult, SearchError> {
        request.validate(self.config)?;
        let deadline = self.config.deadline();
        compose(request, |leg| self.one_way_within(leg, strategy, deadline))
    }

    fn one_way_within(
        &self,
        request: &SearchRequest,
        strategy: Strategy,
        deadline: Deadline,
    ) -> Result<SearchResult, SearchError> {
        let (itineraries, states_explored) = match strategy {
            Strategy::Enumerate => {
                let found = enumerate_paths(self.graph, request, deadline)?;
                (found.itineraries, found.states_explored)
            }
            Strategy::Informed(heuristic) => {
                let found = best_first(self.graph, request, heuristic, deadline)?;
                (found.itineraries, found.states_explored)
            }
        };

        if !itineraries.is_empty() {
            return Ok(SearchResult {
                itineraries,
                used_fallback: false,
                states_explored,
            });
        }

        debug!(
            departure = %request.departure,
            destination = %request.destination,
            max_stops = request.max_stops,
            "No itinerary found, trying neighbouring airports"
        );

        let itineraries = self.fallback(&request.departure, &request.destination, request.cabin);
        Ok(SearchResult {
            used_fallback: !itineraries.is_empty(),
            itineraries,
            states_explored,
        })
    }
}
