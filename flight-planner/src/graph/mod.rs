//! Airport and route graph.
//!
//! The graph is built once from a dataset snapshot and then only read.
//! Searches borrow it immutably, so any number of them may run at the same
//! time without coordination.

mod loader;

use std::collections::HashMap;

use crate::domain::{Airport, AirportCode, Route};
use crate::geo::distance_between;

pub use loader::{LoadError, from_json_str, from_reader, load_file};

/// Default radius for [`AirportGraph::neighbouring_airports`].
pub const DEFAULT_NEIGHBOUR_RADIUS_KM: f64 = 500.0;

/// Directed multigraph of airports and their outgoing routes.
#[derive(Debug, Clone, Default)]
pub struct AirportGraph {
    airports: HashMap<AirportCode, Airport>,
    routes: HashMap<AirportCode, Vec<Route>>,
}

impl AirportGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an airport. Does nothing if the code is already known.
    pub fn add_airport(&mut self, airport: Airport) {
        let code = airport.code;
        if self.airports.contains_key(&code) {
            return;
        }
        self.airports.insert(code, airport);
        self.routes.entry(code).or_default();
    }

    /// Add a directed route from `from`.
    ///
    /// `from` need not be a known airport. Parallel routes are kept.
    pub fn add_route(&mut self, from: AirportCode, route: Route) {
        self.routes.entry(from).or_default().push(route);
    }

    /// Outgoing routes from an airport. Empty for unknown airports.
    pub fn routes_from(&self, code: &AirportCode) -> &[Route] {
        self.routes.get(code).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Attributes of an airport, if known.
    pub fn info(&self, code: &AirportCode) -> Option<&Airport> {
        self.airports.get(code)
    }

    /// Returns true if the airport is known.
    pub fn contains(&self, code: &AirportCode) -> bool {
        self.airports.contains_key(code)
    }

    /// Iterate over all known airports, in no particular order.
    pub fn airports(&self) -> impl Iterator<Item = &Airport> {
        self.airports.values()
    }

    /// Number of known airports.
    pub fn len(&self) -> usize {
        self.airports.len()
    }

    /// Returns true if there are no airports.
    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    /// Total number of directed routes, counting parallel routes separately.
    pub fn route_count(&self) -> usize {
        self.routes.values().map(Vec::len).sum()
    }

    /// Airports in the same country code within `max_km` of `code`.
    ///
    /// Returns an empty list if `code` is unknown or has no coordinates.
    /// Candidates without coordinates are skipped. Sorted by code.
    pub fn neighbouring_airports(&self, code: &AirportCode, max_km: f64) -> Vec<AirportCode> {
        let Some(source) = self.info(code) else {
            return Vec::new();
        };
        let Some(origin) = source.coordinates else {
            return Vec::new();
        };

        let mut neighbours: Vec<AirportCode> = self
            .airports
            .values()
            .filter(|a| a.code != *code && a.country_code == source.country_code)
            .filter(|a| {
                a.coordinates
                    .is_some_and(|c| distance_between(&origin, &c) <= max_km)
            })
            .map(|a| a.code)
            .collect();

        neighbours.sort();
        neighbours
    }

    /// Find airports whose code or name contains `query`, case-insensitively.
    ///
    /// Results are sorted by code and truncated to `limit`.
    pub fn search_airports(&self, query: &str, limit: usize) -> Vec<&Airport> {
        let needle = query.trim().to_lowercase();

        let mut matches: Vec<&Airport> = self
            .airports
            .values()
            .filter(|a| {
                needle.is_empty()
                    || a.code.as_str().to_lowercase().contains(&needle)
                    || a.name.to_lowercase().contains(&needle)
            })
            .collect();

        matches.sort_by_key(|a| a.code);
        matches.truncate(limit);
        matches
    }
}
