//! Search configuration for the route planner.

use std::time::{Duration, Instant};

/// Configuration parameters for route search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Largest stop budget a request may ask for.
    /// Enumeration is exponential in this, so it is capped.
    pub max_stops_limit: usize,

    /// Maximum number of itineraries to return to a caller.
    pub max_results: usize,

    /// Optional wall-clock budget for a single search (milliseconds).
    pub time_budget_ms: Option<u64>,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(max_stops_limit: usize, max_results: usize, time_budget_ms: Option<u64>) -> Self {
        Self {
            max_stops_limit,
            max_results,
            time_budget_ms,
        }
    }

    /// Returns the time budget as a Duration.
    pub fn time_budget(&self) -> Option<Duration> {
        self.time_budget_ms.map(Duration::from_millis)
    }

    /// Start the clock for one search.
    pub(crate) fn deadline(&self) -> Deadline {
        Deadline {
            at: self.time_budget().map(|budget| Instant::now() + budget),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_stops_limit: 3,
            max_results: 50,
            time_budget_ms: None,
        }
    }
}

/// Point in time after which a search gives up.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Deadline {
    at: Option<Instant>,
}

impl Deadline {
    /// A deadline that never expires.
    #[cfg(test)]
    pub(crate) fn none() -> Self {
        Self { at: None }
    }

    pub(crate) fn expired(&self) -> bool {
        self.at.is_some_and(|at| Instant::now() >= at)
    }
}
