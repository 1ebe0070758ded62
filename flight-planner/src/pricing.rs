//! Fare model.
//!
//! Prices are derived purely from the shape of an itinerary: its total
//! distance, how many stops it makes, and the cabin. Every search strategy
//! prices through [`price`], so the same path always costs the same.
//!
//! All prices are in a single reference unit. Currency conversion is a
//! display concern and lives in [`crate::currency`].

use crate::domain::Cabin;

/// Base fare per kilometre.
pub const RATE_PER_KM: f64 = 0.3;

/// Flat per-kilometre rate for neighbour fallback suggestions.
pub const FALLBACK_RATE_PER_KM: f64 = 0.5;

/// Round to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Discount applied to the base fare for a given number of stops.
///
/// More connections lower the effective per-km rate.
pub fn stop_discount(stop_count: usize) -> f64 {
    match stop_count {
        0 => 1.0,
        1 => 0.85,
        2 => 0.75,
        _ => 0.7,
    }
}

/// Economy fare for a path, before the cabin multiplier.
pub fn base_price(distance_km: f64, stop_count: usize) -> f64 {
    round2(distance_km * RATE_PER_KM * stop_discount(stop_count))
}

/// Final fare for a path of `distance_km` with `stop_count` stops.
///
/// The discounted base is rounded first, then scaled by the cabin and
/// rounded again.
///
/// ```
/// use flight_planner::domain::Cabin;
/// use flight_planner::pricing::price;
///
/// assert_eq!(price(1400.0, 0, Cabin::Economy), 420.0);
/// assert_eq!(price(1200.0, 1, Cabin::Economy), 306.0);
/// assert_eq!(price(1200.0, 1, Cabin::Business), 612.0);
/// ```
pub fn price(distance_km: f64, stop_count: usize, cabin: Cabin) -> f64 {
    round2(base_price(distance_km, stop_count) * cabin.multiplier())
}

/// Price of a neighbour fallback suggestion.
///
/// Ignores stops and cabin.
pub fn fallback_price(distance_km: f64) -> f64 {
    round2(distance_km * FALLBACK_RATE_PER_KM)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_economy() {
        assert_eq!(price(1400.0, 0, Cabin::Economy), 420.0);
        assert_eq!(price(0.0, 0, Cabin::Economy), 0.0);
    }

    #[test]
    fn stop_discounts() {
        assert_eq!(price(1000.0, 1, Cabin::Economy), 255.0);
        assert_eq!(price(1000.0, 2, Cabin::Economy), 225.0);
        assert_eq!(price(1000.0, 3, Cabin::Economy), 210.0);
        assert_eq!(price(1000.0, 7, Cabin::Economy), 210.0);
    }

    #[test]
    fn cabin_multipliers() {
        assert_eq!(price(1000.0, 0, Cabin::PremiumEconomy), 450.0);
        assert_eq!(price(1000.0, 0, Cabin::Business), 600.0);
        assert_eq!(price(1000.0, 0, Cabin::First), 750.0);
    }

    #[test]
    fn rounds_to_cents() {
        // 333 * 0.3 * 0.85 = 84.915
        let p = price(333.0, 1, Cabin::Economy);
        assert_eq!(p, round2(p));
        assert!((p - 84.92).abs() < 0.011);
    }

    #[test]
    fn fallback_is_flat() {
        assert_eq!(fallback_price(800.0), 400.0);
        assert_eq!(fallback_price(123.456), 61.73);
    }
}
