//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Airport, Itinerary};

/// Request to search airports by code or name.
#[derive(Debug, Deserialize)]
pub struct AirportSearchRequest {
    /// Search query
    #[serde(default)]
    pub q: String,

    /// Maximum number of results (default 10, max 50)
    pub limit: Option<usize>,
}

/// An airport.
#[derive(Debug, Serialize)]
pub struct AirportResult {
    /// IATA code
    pub code: String,

    /// Airport name
    pub name: String,

    pub country: String,
    pub country_code: String,

    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Response for airport search.
#[derive(Debug, Serialize)]
pub struct AirportSearchResponse {
    pub airports: Vec<AirportResult>,
}

/// Request for a one-way route search.
#[derive(Debug, Default, Deserialize)]
pub struct RouteSearchRequest {
    /// Departure airport code
    pub departure: String,

    /// Destination airport code
    pub destination: String,

    /// Maximum stops (default 2)
    pub stops: Option<i64>,

    /// Cabin class name (default Economy)
    pub cabin: Option<String>,

    /// `cheapest`, `fastest` or `shortest` (default cheapest)
    pub sort: Option<String>,

    /// `enumerate`, `astar` or `dijkstra` (default enumerate)
    pub strategy: Option<String>,

    /// Display currency code (default SGD)
    pub currency: Option<String>,

    /// Drop itineraries repeating an earlier airport sequence
    #[serde(default)]
    pub unique: bool,
}

/// Request for a two-leg multi-city search.
///
/// Options apply to both legs.
#[derive(Debug, Default, Deserialize)]
pub struct MultiCitySearchRequest {
    pub departure: String,

    /// Airport visited between the two legs
    pub middle: String,

    pub destination: String,

    /// Maximum stops per leg (default 2)
    pub stops: Option<i64>,
    pub cabin: Option<String>,
    pub sort: Option<String>,
    pub strategy: Option<String>,
    pub currency: Option<String>,
    #[serde(default)]
    pub unique: bool,
}

/// Presentation options common to both search requests.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub sort: Option<String>,
    pub strategy: Option<String>,
    pub currency: Option<String>,
    pub unique: bool,
}

impl RouteSearchRequest {
    pub fn options(&self) -> SearchOptions {
        SearchOptions {
            sort: self.sort.clone(),
            strategy: self.strategy.clone(),
            currency: self.currency.clone(),
            unique: self.unique,
        }
    }
}

impl MultiCitySearchRequest {
    pub fn options(&self) -> SearchOptions {
        SearchOptions {
            sort: self.sort.clone(),
            strategy: self.strategy.clone(),
            currency: self.currency.clone(),
            unique: self.unique,
        }
    }
}

/// A priced itinerary.
#[derive(Debug, Serialize)]
pub struct ItineraryResult {
    /// Airport codes in travel order
    pub path: Vec<String>,

    pub distance_km: f64,

    pub duration_min: u32,

    /// Number of intermediate airports
    pub stops: usize,

    /// Price in the response currency
    pub price: f64,

    pub cabin: String,

    /// `standard` or `fallback-neighbor`
    pub provenance: String,
}

/// Response for route searches.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub itineraries: Vec<ItineraryResult>,

    /// True if the results are neighbour-fallback suggestions
    pub fallback: bool,

    /// Currency the prices are quoted in
    pub currency: String,

    /// Number of search states examined
    pub states_explored: usize,

    /// Set when no itinerary is available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl AirportResult {
    /// Create from a domain Airport.
    pub fn from_airport(airport: &Airport) -> Self {
        Self {
            code: airport.code.to_string(),
            name: airport.name.clone(),
            country: airport.country.clone(),
            country_code: airport.country_code.clone(),
            latitude: airport.coordinates.map(|c| c.latitude()),
            longitude: airport.coordinates.map(|c| c.longitude()),
        }
    }
}

impl ItineraryResult {
    /// Create from a domain Itinerary, quoting `price` instead of the
    /// itinerary's reference-unit price.
    pub fn from_itinerary(itinerary: &Itinerary, price: f64) -> Self {
        Self {
            path: itinerary.path().iter().map(|c| c.to_string()).collect(),
            distance_km: itinerary.distance_km(),
            duration_min: itinerary.duration_min(),
            stops: itinerary.stop_count(),
            price,
            cabin: itinerary.cabin().name().to_string(),
            provenance: itinerary.provenance().as_str().to_string(),
        }
    }
}
