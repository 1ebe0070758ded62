//! Itinerary ranking for search results.
//!
//! Orders itineraries by a caller-selected criterion to present the most
//! useful options first.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::domain::{AirportCode, Itinerary};

/// Error returned when parsing an unknown ranking criterion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort criterion: {0}")]
pub struct InvalidCriterion(pub String);

/// How to order a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RankCriterion {
    /// Fewest stops, then lowest price.
    #[default]
    Cheapest,
    /// Shortest total flight time.
    Fastest,
    /// Shortest total distance.
    Shortest,
}

impl RankCriterion {
    /// Parse a criterion name: `cheapest`, `fastest` or `shortest`.
    pub fn parse(s: &str) -> Result<Self, InvalidCriterion> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cheapest" => Ok(RankCriterion::Cheapest),
            "fastest" => Ok(RankCriterion::Fastest),
            "shortest" => Ok(RankCriterion::Shortest),
            _ => Err(InvalidCriterion(s.to_string())),
        }
    }

    fn compare(&self, a: &Itinerary, b: &Itinerary) -> Ordering {
        match self {
            RankCriterion::Cheapest => {
                // Primary: fewer stops
                let stops_cmp = a.stop_count().cmp(&b.stop_count());
                if stops_cmp != Ordering::Equal {
                    return stops_cmp;
                }

                // Secondary: lower price
                a.price().total_cmp(&b.price())
            }
            RankCriterion::Fastest => a.duration().cmp(&b.duration()),
            RankCriterion::Shortest => a.distance_km().total_cmp(&b.distance_km()),
        }
    }
}

/// Rank itineraries best-first by `criterion`.
///
/// The sort is stable: itineraries that compare equal keep their input order.
pub fn rank_itineraries(
    mut itineraries: Vec<Itinerary>,
    criterion: RankCriterion,
) -> Vec<Itinerary> {
    itineraries.sort_by(|a, b| criterion.compare(a, b));
    itineraries
}

/// Remove itineraries that fly exactly the same airport sequence as an
/// earlier one.
///
/// Parallel routes between the same airports produce such duplicates. The
/// first occurrence is kept, so rank first to keep the best of each group.
pub fn deduplicate(itineraries: Vec<Itinerary>) -> Vec<Itinerary> {
    if itineraries.len() <= 1 {
        return itineraries;
    }

    let mut seen: HashSet<Vec<AirportCode>> = HashSet::with_capacity(itineraries.len());
    itineraries
        .into_iter()
        .filter(|itinerary| seen.insert(itinerary.path().to_vec()))
        .collect()
}
