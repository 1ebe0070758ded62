//! Best-first search under a stop budget.
//!
//! A*-style search keyed by distance so far plus a great-circle estimate of
//! the remaining distance, or Dijkstra when the estimate is zero. Unlike
//! enumeration, this returns only the shortest itinerary for each stop
//! count, which keeps it tractable on the full route network.
//!
//! A partial path is pruned only when another path reaches the same airport
//! with the same stops, no more distance, and a subset of its airports.
//! Anything the pruned path could still be extended with, the survivor can
//! too, so per-stop-count optimality survives the pruning. Optimality
//! assumes the estimate never exceeds the flown distance of any continuation,
//! which holds for great-circle distance when route lengths are at least the
//! great-circle distance between their ends.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use tracing::{debug, trace};

use super::config::Deadline;
use super::search::{SearchError, SearchRequest, priced_itinerary};
use crate::domain::{AirportCode, Itinerary};
use crate::geo::heuristic_km;
use crate::graph::AirportGraph;

/// Remaining-distance estimate used to order the frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Heuristic {
    /// Great-circle distance to the destination (A*).
    #[default]
    GreatCircle,
    /// No estimate (Dijkstra).
    Zero,
}

impl Heuristic {
    fn estimate(&self, graph: &AirportGraph, from: &AirportCode, to: &AirportCode) -> f64 {
        match self {
            Heuristic::GreatCircle => heuristic_km(graph, from, to),
            Heuristic::Zero => 0.0,
        }
    }
}

/// Frontier entry.
///
/// `stops_used` is the stop count of `path` as it stands: airports in the
/// path minus the two ends. The departure entry counts as zero.
#[derive(Debug, Clone)]
struct FrontierEntry {
    priority: f64,
    seq: u64,
    stops_used: usize,
    airport: AirportCode,
    path: Vec<AirportCode>,
    distance_km: f64,
    duration_min: u32,
}

// BinaryHeap is a max-heap; order entries so the lowest priority pops first,
// and among equal priorities the earliest pushed.
impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

/// A recorded partial path to some `(airport, stops_used)` state.
#[derive(Debug)]
struct Label {
    seq: u64,
    distance_km: f64,
    path: Vec<AirportCode>,
}

impl Label {
    /// True if a path with this label's airports and distance is at least as
    /// good as `path` at `distance_km` for every possible continuation.
    fn dominates(&self, distance_km: f64, path: &[AirportCode]) -> bool {
        self.distance_km <= distance_km && self.path.iter().all(|c| path.contains(c))
    }
}

/// Non-dominated partial paths per `(airport, stops_used)`.
#[derive(Debug, Default)]
struct Labels {
    by_state: HashMap<(AirportCode, usize), Vec<Label>>,
}

impl Labels {
    /// Record a new partial path unless an existing one dominates it.
    ///
    /// Existing labels the new one dominates are dropped, which makes their
    /// frontier entries stale. Returns false if the path was rejected.
    fn insert(&mut self, key: (AirportCode, usize), label: Label) -> bool {
        let labels = self.by_state.entry(key).or_default();
        if labels
            .iter()
            .any(|known| known.dominates(label.distance_km, &label.path))
        {
            return false;
        }
        labels.retain(|known| !label.dominates(known.distance_km, &known.path));
        labels.push(label);
        true
    }

    /// True if the entry pushed with `seq` is still a live label.
    fn is_live(&self, key: &(AirportCode, usize), seq: u64) -> bool {
        self.by_state
            .get(key)
            .is_some_and(|labels| labels.iter().any(|l| l.seq == seq))
    }
}

/// Result of informed search: at most one itinerary per stop count.
pub(super) struct InformedResult {
    pub itineraries: Vec<Itinerary>,
    pub states_explored: usize,
}

/// Find the shortest itinerary for each stop count up to `max_stops`.
///
/// States are `(airport, stops_used)`. An entry is dropped when another
/// path to the same state dominates it (see [`Label::dominates`]). Reaching
/// the destination emits an itinerary and ends that branch. Results are
/// ordered by stop count.
pub(super) fn best_first(
    graph: &AirportGraph,
    request: &SearchRequest,
    heuristic: Heuristic,
    deadline: Deadline,
) -> Result<InformedResult, SearchError> {
    let destination = request.destination;

    let mut labels = Labels::default();
    let mut emitted_stops: HashSet<usize> = HashSet::new();
    let mut itineraries = Vec::new();
    let mut states_explored = 0;
    let mut seq = 0u64;

    let mut frontier = BinaryHeap::new();
    labels.insert(
        (request.departure, 0),
        Label {
            seq,
            distance_km: 0.0,
            path: vec![request.departure],
        },
    );
    frontier.push(FrontierEntry {
        priority: heuristic.estimate(graph, &request.departure, &destination),
        seq,
        stops_used: 0,
        airport: request.departure,
        path: vec![request.departure],
        distance_km: 0.0,
        duration_min: 0,
    });

    while let Some(entry) = frontier.pop() {
        if deadline.expired() {
            debug!(states_explored, "Informed search exceeded its time budget");
            return Err(SearchError::Timeout);
        }

        // Stale: a dominating path to this state was recorded after push
        if !labels.is_live(&(entry.airport, entry.stops_used), entry.seq) {
            continue;
        }
        states_explored += 1;

        if entry.airport == destination && entry.path.len() >= 2 {
            // First pop per stop count is the shortest for that count
            if emitted_stops.insert(entry.stops_used) {
                if let Some(itinerary) = priced_itinerary(
                    entry.path,
                    entry.distance_km,
                    entry.duration_min,
                    request.cabin,
                ) {
                    itineraries.push(itinerary);
                }
            }
            continue;
        }

        let is_departure = entry.path.len() == 1;
        if !is_departure && entry.stops_used >= request.max_stops {
            continue;
        }

        // Stop count of any path one airport longer than this one
        let child_stops = entry.path.len() - 1;

        for route in graph.routes_from(&entry.airport) {
            let next = route.destination;
            if entry.path.contains(&next) {
                continue;
            }
            // A non-destination airport at the budget could never be expanded
            if next != destination && child_stops >= request.max_stops {
                continue;
            }

            let distance_km = entry.distance_km + route.distance_km;
            let mut path = entry.path.clone();
            path.push(next);

            seq += 1;
            let label = Label {
                seq,
                distance_km,
                path: path.clone(),
            };
            if !labels.insert((next, child_stops), label) {
                continue;
            }

            frontier.push(FrontierEntry {
                priority: distance_km + heuristic.estimate(graph, &next, &destination),
                seq,
                stops_used: child_stops,
                airport: next,
                path,
                distance_km,
                duration_min: entry.duration_min.saturating_add(route.duration_min),
            });
        }

        trace!(
            airport = %entry.airport,
            stops_used = entry.stops_used,
            frontier = frontier.len(),
            "Expanded airport"
        );
    }

    itineraries.sort_by_key(Itinerary::stop_count);

    debug!(
        departure = %request.departure,
        destination = %destination,
        ?heuristic,
        itineraries = itineraries.len(),
        states_explored,
        "Informed search complete"
    );

    Ok(InformedResult {
        itineraries,
        states_explored,
    })
}
