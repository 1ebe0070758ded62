//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::planner::SearchConfig;

const DEFAULT_DATASET: &str = "dataset/airline_routes.json";
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// Error from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value for {var}: {value:?}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
}

/// Everything `main` needs to start serving.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Route dataset (`FLIGHT_DATASET`).
    pub dataset: PathBuf,
    /// Optional currency table (`FLIGHT_CURRENCY`).
    pub currency: Option<PathBuf>,
    /// Listen address (`FLIGHT_ADDR`).
    pub addr: SocketAddr,
    /// Search limits (`FLIGHT_MAX_STOPS`, `FLIGHT_MAX_RESULTS`,
    /// `FLIGHT_TIME_BUDGET_MS`).
    pub search: SearchConfig,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    ///
    /// Unset variables take their defaults; set but unparsable ones are
    /// errors.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value if set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let defaults = SearchConfig::default();
        let search = SearchConfig::new(
            parse_var(&get, "FLIGHT_MAX_STOPS")?.unwrap_or(defaults.max_stops_limit),
            parse_var(&get, "FLIGHT_MAX_RESULTS")?.unwrap_or(defaults.max_results),
            parse_var(&get, "FLIGHT_TIME_BUDGET_MS")?.or(defaults.time_budget_ms),
        );

        let addr = match parse_var(&get, "FLIGHT_ADDR")? {
            Some(addr) => addr,
            None => DEFAULT_ADDR.parse().map_err(|_| ConfigError {
                var: "FLIGHT_ADDR",
                value: DEFAULT_ADDR.to_string(),
            })?,
        };

        Ok(Self {
            dataset: get("FLIGHT_DATASET")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET)),
            currency: get("FLIGHT_CURRENCY").map(PathBuf::from),
            addr,
            search,
        })
    }
}

fn parse_var<T, G>(get: &G, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError { var, value }),
    }
}
