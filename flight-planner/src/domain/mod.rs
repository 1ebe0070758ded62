//! Domain types for the flight route planner.
//!
//! This module contains the core domain model types. All types enforce
//! their invariants at construction time, so code that receives these
//! types can trust their validity.

mod airport;
mod cabin;
mod error;
mod itinerary;
mod route;

pub use airport::{Airport, AirportCode, Coordinates, InvalidAirportCode};
pub use cabin::{Cabin, InvalidCabin};
pub use error::DomainError;
pub use itinerary::{Itinerary, Provenance};
pub use route::Route;
