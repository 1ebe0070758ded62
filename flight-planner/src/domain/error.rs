//! Domain error types.
//!
//! These errors represent validation failures in the domain layer.
//! They are distinct from loading and request errors.

use super::AirportCode;

/// Domain-level errors for itinerary construction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Itinerary has fewer than two airports
    #[error("itinerary must visit at least two airports")]
    TooShort,

    /// Itinerary visits the same airport twice
    #[error("itinerary visits {0} more than once")]
    RepeatedAirport(AirportCode),

    /// Price is negative or not a number
    #[error("invalid price: {0}")]
    InvalidPrice(f64),
}
