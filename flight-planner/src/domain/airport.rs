//! Airport identity and attributes.

use std::fmt;

/// Error returned when parsing an invalid airport code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid airport code: {reason}")]
pub struct InvalidAirportCode {
    reason: &'static str,
}

/// A valid 3-letter IATA airport code.
///
/// IATA codes are always 3 uppercase ASCII letters. This type guarantees
/// that any `AirportCode` value is valid by construction.
///
/// # Examples
///
/// ```
/// use flight_planner::domain::AirportCode;
///
/// let sin = AirportCode::parse("SIN").unwrap();
/// assert_eq!(sin.as_str(), "SIN");
///
/// // Lowercase is rejected by the strict parser
/// assert!(AirportCode::parse("sin").is_err());
///
/// // ...but accepted when normalizing user input
/// assert_eq!(AirportCode::parse_normalized(" sin ").unwrap(), sin);
///
/// // Empty codes are rejected
/// assert!(AirportCode::parse("").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AirportCode([u8; 3]);

impl AirportCode {
    /// Parse an airport code from a string.
    ///
    /// The input must be exactly 3 uppercase ASCII letters (A-Z).
    pub fn parse(s: &str) -> Result<Self, InvalidAirportCode> {
        let bytes = s.as_bytes();

        if bytes.is_empty() {
            return Err(InvalidAirportCode {
                reason: "must not be empty",
            });
        }

        if bytes.len() != 3 {
            return Err(InvalidAirportCode {
                reason: "must be exactly 3 characters",
            });
        }

        for &b in bytes {
            if !b.is_ascii_uppercase() {
                return Err(InvalidAirportCode {
                    reason: "must be uppercase ASCII letters A-Z",
                });
            }
        }

        Ok(AirportCode([bytes[0], bytes[1], bytes[2]]))
    }

    /// Parse user input, trimming whitespace and uppercasing first.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidAirportCode> {
        Self::parse(&s.trim().to_ascii_uppercase())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII uppercase letters are ever stored.
        std::str::from_utf8(&self.0).unwrap_or("???")
    }
}

impl fmt::Debug for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AirportCode({})", self.as_str())
    }
}

impl fmt::Display for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Returns `None` unless both values are finite and within range.
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);

        valid.then_some(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Static attributes of an airport.
///
/// Airports without usable coordinates can still be route endpoints, but
/// they take no part in distance estimates or neighbour fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct Airport {
    pub code: AirportCode,
    pub name: String,
    pub country: String,
    pub country_code: String,
    pub coordinates: Option<Coordinates>,
}

impl Airport {
    /// Create an airport record.
    pub fn new(
        code: AirportCode,
        name: impl Into<String>,
        country: impl Into<String>,
        country_code: impl Into<String>,
        coordinates: Option<Coordinates>,
    ) -> Self {
        Self {
            code,
            name: name.into(),
            country: country.into(),
            country_code: country_code.into(),
            coordinates,
        }
    }

    /// Returns true if this airport shares a country with `other`.
    pub fn same_country(&self, other: &Airport) -> bool {
        self.country == other.country
    }
}
