//! Itinerary types.
//!
//! An `Itinerary` is one priced travel option: an ordered, cycle-free
//! sequence of airports with the totals accumulated along it.

use std::collections::HashSet;
use std::fmt;

use chrono::Duration;

use super::{AirportCode, Cabin, DomainError};

/// Where an itinerary came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provenance {
    /// Found by searching the route graph.
    Standard,
    /// Substituted by neighbour fallback after the search came up empty.
    FallbackNeighbor,
}

impl Provenance {
    /// Wire label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::Standard => "standard",
            Provenance::FallbackNeighbor => "fallback-neighbor",
        }
    }

    /// Combine the provenance of two joined legs.
    ///
    /// The result is a fallback if either side is.
    pub fn merge(self, other: Provenance) -> Provenance {
        if self == Provenance::FallbackNeighbor || other == Provenance::FallbackNeighbor {
            Provenance::FallbackNeighbor
        } else {
            Provenance::Standard
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A complete, priced travel option.
///
/// # Invariants
///
/// - At least two airports
/// - No airport appears twice
/// - Price is finite and non-negative
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    path: Vec<AirportCode>,
    distance_km: f64,
    duration_min: u32,
    price: f64,
    cabin: Cabin,
    provenance: Provenance,
}

impl Itinerary {
    /// Constructs an itinerary, checking its invariants.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is shorter than two airports, repeats
    /// an airport, or the price is negative.
    pub fn new(
        path: Vec<AirportCode>,
        distance_km: f64,
        duration_min: u32,
        price: f64,
        cabin: Cabin,
        provenance: Provenance,
    ) -> Result<Self, DomainError> {
        if path.len() < 2 {
            return Err(DomainError::TooShort);
        }

        let mut seen = HashSet::with_capacity(path.len());
        for code in &path {
            if !seen.insert(*code) {
                return Err(DomainError::RepeatedAirport(*code));
            }
        }

        if !price.is_finite() || price < 0.0 {
            return Err(DomainError::InvalidPrice(price));
        }

        Ok(Self {
            path,
            distance_km,
            duration_min,
            price,
            cabin,
            provenance,
        })
    }

    /// Airports visited, in order.
    pub fn path(&self) -> &[AirportCode] {
        &self.path
    }

    /// First airport.
    pub fn origin(&self) -> &AirportCode {
        // Invariant: len >= 2
        &self.path[0]
    }

    /// Last airport.
    pub fn destination(&self) -> &AirportCode {
        &self.path[self.path.len() - 1]
    }

    /// Number of intermediate airports.
    pub fn stop_count(&self) -> usize {
        self.path.len() - 2
    }

    /// Returns true if there are no intermediate stops.
    pub fn is_direct(&self) -> bool {
        self.stop_count() == 0
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn duration_min(&self) -> u32 {
        self.duration_min
    }

    /// Total flying time as a Duration.
    pub fn duration(&self) -> Duration {
        Duration::minutes(i64::from(self.duration_min))
    }

    /// Final price in the reference currency.
    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn cabin(&self) -> Cabin {
        self.cabin
    }

    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    /// Returns true if this itinerary was produced by neighbour fallback.
    pub fn is_fallback(&self) -> bool {
        self.provenance == Provenance::FallbackNeighbor
    }
}

impl fmt::Display for Itinerary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, code) in self.path.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{code}")?;
        }
        write!(
            f,
            " ({} km, {} min, {:.2}, {})",
            self.distance_km, self.duration_min, self.price, self.cabin
        )
    }
}
