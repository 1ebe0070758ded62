//! Route planner over the airport graph.
//!
//! This module answers: "how can I fly from here to there with at most this
//! many stops, and what will it cost?"
//!
//! Two search strategies are available: exhaustive bounded breadth-first
//! enumeration, and best-first search (A* or Dijkstra) which keeps only the
//! shortest itinerary per stop count. When neither finds anything, the
//! planner falls back to direct flights into the destination's country.

mod config;
mod enumerate;
mod fallback;
mod informed;
mod multi_city;
mod rank;
mod search;

#[cfg(test)]
mod search_tests;

pub use config::SearchConfig;
pub use informed::Heuristic;
pub use rank::{InvalidCriterion, RankCriterion, deduplicate, rank_itineraries};
pub use search::{
    InvalidStrategy, MultiCityRequest, Planner, SearchError, SearchRequest, SearchResult, Strategy,
};
