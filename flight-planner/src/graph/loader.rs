//! Dataset loading.
//!
//! Reads the `airline_routes.json` snapshot format: a JSON object keyed by
//! IATA code, where each airport lists its outgoing routes.
//!
//! ```json
//! {
//!   "SIN": {
//!     "name": "Singapore Changi Airport",
//!     "country": "Singapore",
//!     "country_code": "SG",
//!     "latitude": "1.350189",
//!     "longitude": "103.994433",
//!     "routes": [
//!       { "iata": "HAN", "km": 2208, "min": 195, "carriers": [{ "name": "Scoot" }] }
//!     ]
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use super::AirportGraph;
use crate::domain::{Airport, AirportCode, Coordinates, Route};

/// Errors that can occur while loading a dataset.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Reading the file failed
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid JSON of the expected shape
    #[error("failed to parse dataset: {0}")]
    Json(#[from] serde_json::Error),

    /// An airport record contains an impossible value
    #[error("invalid airport {code}: {reason}")]
    InvalidAirport { code: String, reason: String },
}

#[derive(Debug, Deserialize)]
struct AirportRecord {
    #[serde(default)]
    name: String,
    #[serde(default)]
    country: String,
    #[serde(default)]
    country_code: String,
    #[serde(default)]
    latitude: Option<CoordinateValue>,
    #[serde(default)]
    longitude: Option<CoordinateValue>,
    #[serde(default)]
    routes: Vec<RouteRecord>,
}

#[derive(Debug, Deserialize)]
struct RouteRecord {
    iata: String,
    km: f64,
    min: f64,
    #[serde(default)]
    carriers: Vec<CarrierRecord>,
}

#[derive(Debug, Deserialize)]
struct CarrierRecord {
    name: String,
}

/// Coordinates appear both as numbers and as numeric strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CoordinateValue {
    Number(f64),
    Text(String),
}

impl CoordinateValue {
    fn as_f64(&self) -> Option<f64> {
        match self {
            CoordinateValue::Number(n) => Some(*n),
            CoordinateValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

fn coordinates(record: &AirportRecord) -> Option<Coordinates> {
    let lat = record.latitude.as_ref()?.as_f64()?;
    let lon = record.longitude.as_ref()?.as_f64()?;
    Coordinates::new(lat, lon)
}

/// Build a graph from a JSON document.
pub fn from_json_str(json: &str) -> Result<AirportGraph, LoadError> {
    let records: BTreeMap<String, AirportRecord> = serde_json::from_str(json)?;
    build(records)
}

/// Build a graph from any reader producing a JSON document.
pub fn from_reader(reader: impl Read) -> Result<AirportGraph, LoadError> {
    let records: BTreeMap<String, AirportRecord> = serde_json::from_reader(reader)?;
    build(records)
}

/// Load a graph from a dataset file.
pub fn load_file(path: impl AsRef<Path>) -> Result<AirportGraph, LoadError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let graph = from_reader(std::io::BufReader::new(file))?;
    info!(
        path = %path.display(),
        airports = graph.len(),
        routes = graph.route_count(),
        "Loaded route dataset"
    );
    Ok(graph)
}

fn build(records: BTreeMap<String, AirportRecord>) -> Result<AirportGraph, LoadError> {
    let mut graph = AirportGraph::new();
    let mut skipped_routes = 0usize;

    for (key, record) in records {
        let code = match AirportCode::parse(&key) {
            Ok(code) => code,
            Err(e) => {
                warn!(code = %key, error = %e, "Skipping airport with invalid code");
                continue;
            }
        };

        graph.add_airport(Airport::new(
            code,
            record.name.clone(),
            record.country.clone(),
            record.country_code.clone(),
            coordinates(&record),
        ));

        for route in record.routes {
            if !(route.km.is_finite() && route.km >= 0.0) {
                return Err(LoadError::InvalidAirport {
                    code: key,
                    reason: format!("route to {} has distance {}", route.iata, route.km),
                });
            }
            if !(route.min.is_finite() && route.min >= 0.0) {
                return Err(LoadError::InvalidAirport {
                    code: key,
                    reason: format!("route to {} has duration {}", route.iata, route.min),
                });
            }

            let destination = match AirportCode::parse(&route.iata) {
                Ok(d) => d,
                Err(_) => {
                    skipped_routes += 1;
                    warn!(from = %code, to = %route.iata, "Skipping route with invalid code");
                    continue;
                }
            };

            let carriers = route.carriers.into_iter().map(|c| c.name).collect();
            graph.add_route(
                code,
                Route::new(destination, route.km, route.min.round() as u32, carriers),
            );
        }
    }

    if skipped_routes > 0 {
        warn!(skipped_routes, "Some routes were not loaded");
    }

    Ok(graph)
}
