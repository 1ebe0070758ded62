//! Fare classes.

use std::fmt;

/// Error returned when parsing an unknown cabin name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown cabin class: {0}")]
pub struct InvalidCabin(pub String);

/// Cabin (fare) class of an itinerary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cabin {
    #[default]
    Economy,
    PremiumEconomy,
    Business,
    First,
}

impl Cabin {
    /// All cabins, cheapest first.
    pub const ALL: [Cabin; 4] = [
        Cabin::Economy,
        Cabin::PremiumEconomy,
        Cabin::Business,
        Cabin::First,
    ];

    /// Parse a cabin name, case-insensitively.
    ///
    /// Accepts the display names ("Premium Economy") as well as
    /// snake_case and kebab-case spellings.
    pub fn parse(s: &str) -> Result<Self, InvalidCabin> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "economy" => Ok(Cabin::Economy),
            "premiumeconomy" => Ok(Cabin::PremiumEconomy),
            "business" => Ok(Cabin::Business),
            "first" => Ok(Cabin::First),
            _ => Err(InvalidCabin(s.to_string())),
        }
    }

    /// Fare multiplier applied on top of the economy price.
    pub fn multiplier(&self) -> f64 {
        match self {
            Cabin::Economy => 1.0,
            Cabin::PremiumEconomy => 1.5,
            Cabin::Business => 2.0,
            Cabin::First => 2.5,
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Cabin::Economy => "Economy",
            Cabin::PremiumEconomy => "Premium Economy",
            Cabin::Business => "Business",
            Cabin::First => "First",
        }
    }
}

impl fmt::Display for Cabin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
