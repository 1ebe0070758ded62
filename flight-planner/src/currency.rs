//! Display currencies.
//!
//! Fares are computed in a single reference unit (Singapore dollars). This
//! table converts them for display only; it never feeds back into search.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::pricing::round2;

/// Currency that fares are quoted in before conversion.
pub const REFERENCE_CURRENCY: &str = "SGD";

/// Errors from loading or using the currency table.
#[derive(Debug, thiserror::Error)]
pub enum CurrencyError {
    #[error("failed to read currency table: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse currency table: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown currency: {0}")]
    UnknownCurrency(String),
}

/// One entry of the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyRate {
    /// Prefix shown before amounts, usually the ISO code.
    pub symbol: String,
    /// Units of this currency per reference unit.
    pub rate: f64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct CurrencyDocument {
    rates: HashMap<String, CurrencyRate>,
}

/// Exchange rates keyed by ISO code.
#[derive(Debug, Clone)]
pub struct CurrencyTable {
    rates: HashMap<String, CurrencyRate>,
}

impl CurrencyTable {
    /// Parse a `{"rates": {...}}` document.
    pub fn from_json_str(json: &str) -> Result<Self, CurrencyError> {
        let doc: CurrencyDocument = serde_json::from_str(json)?;
        Ok(Self::from_rates(doc.rates))
    }

    /// Load the table from a file.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, CurrencyError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let table = Self::from_json_str(&contents)?;
        info!(path = %path.display(), currencies = table.len(), "Loaded currency table");
        Ok(table)
    }

    fn from_rates(rates: HashMap<String, CurrencyRate>) -> Self {
        let rates = rates
            .into_iter()
            .map(|(code, rate)| (code.to_ascii_uppercase(), rate))
            .collect();
        Self { rates }
    }

    /// Look up a currency by code, case-insensitively.
    pub fn get(&self, code: &str) -> Result<&CurrencyRate, CurrencyError> {
        self.rates
            .get(&code.trim().to_ascii_uppercase())
            .ok_or_else(|| CurrencyError::UnknownCurrency(code.to_string()))
    }

    /// Convert a reference-unit price into `code`, rounded to two decimals.
    pub fn convert(&self, price: f64, code: &str) -> Result<f64, CurrencyError> {
        let rate = self.get(code)?;
        Ok(round2(price * rate.rate))
    }

    /// Currency codes, sorted.
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.rates.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "rates": {
            "SGD": { "symbol": "SGD", "rate": 1.0, "name": "Singapore Dollar" },
            "USD": { "symbol": "USD", "rate": 0.74, "name": "United States Dollar" },
            "krw": { "symbol": "KRW", "rate": 1005.5, "name": "South Korean Won" }
        }
    }"#;

    #[test]
    fn converts_prices() {
        let table = CurrencyTable::from_json_str(SAMPLE).unwrap();

        assert_eq!(table.convert(420.0, "SGD").unwrap(), 420.0);
        assert_eq!(table.convert(420.0, "USD").unwrap(), 310.8);
        assert_eq!(table.convert(306.0, "usd").unwrap(), 226.44);
        assert_eq!(table.convert(1.0, "KRW").unwrap(), 1005.5);
    }

    #[test]
    fn unknown_currency_is_error() {
        let table = CurrencyTable::from_json_str(SAMPLE).unwrap();
        let err = table.convert(1.0, "XYZ").unwrap_err();
        assert!(matches!(err, CurrencyError::UnknownCurrency(ref c) if c == "XYZ"));
        assert_eq!(err.to_string(), "unknown currency: XYZ");
    }

    #[test]
    fn codes_are_sorted_and_normalized() {
        let table = CurrencyTable::from_json_str(SAMPLE).unwrap();
        assert_eq!(table.codes(), vec!["KRW", "SGD", "USD"]);
        assert_eq!(table.get(REFERENCE_CURRENCY).unwrap().name, "Singapore Dollar");
    }

    #[test]
    fn rejects_missing_rates() {
        assert!(matches!(
            CurrencyTable::from_json_str(r#"{"SGD": 1.0}"#),
            Err(CurrencyError::Json(_))
        ));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let table = CurrencyTable::load_file(file.path()).unwrap();
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            CurrencyTable::load_file(dir.path().join("currency.json")),
            Err(CurrencyError::Io(_))
        ));
    }
}
