//! Exchange-rate reference data.
//!
//! Rates are multipliers from USD into a target currency, read once per
//! run from a CSV file with `Currency` and `Rate` columns:
//!
//! ```text
//! Currency,Rate
//! EUR,0.93
//! GBP,0.8
//! INR,82.95
//! ```

use crate::error::{DataError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Currencies every converted record carries besides USD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetCurrency {
    /// Euro
    Eur,
    /// Pound sterling
    Gbp,
    /// Indian rupee
    Inr,
}

impl TargetCurrency {
    /// All target currencies, in column order.
    pub const ALL: [Self; 3] = [Self::Eur, Self::Gbp, Self::Inr];

    /// ISO 4217 code as it appears in the rates file.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Inr => "INR",
        }
    }
}

impl fmt::Display for TargetCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Deserialize)]
struct RateRow {
    #[serde(rename = "Currency")]
    currency: String,
    #[serde(rename = "Rate")]
    rate: String,
}

/// Mapping from currency code to USD multiplier.
///
/// Values are stored as given; positivity is checked where a rate is used
/// (see [`ExchangeRateTable::require`]).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExchangeRateTable {
    rates: HashMap<String, f64>,
}

impl ExchangeRateTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(code, rate)` pairs. Later duplicates are ignored.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut table = Self::new();
        for (code, rate) in pairs {
            table.insert(code.as_ref(), rate);
        }
        table
    }

    /// Load a table from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Io`] if the file cannot be opened, and the
    /// errors of [`Self::from_reader`] otherwise.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        let table = Self::from_reader(file)?;
        debug!(path = %path.as_ref().display(), currencies = table.len(), "loaded exchange rates");
        Ok(table)
    }

    /// Load a table from CSV data with `Currency` and `Rate` columns.
    ///
    /// Codes are trimmed and upper-cased; the first row for a code wins.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Config`] if the named columns are missing and
    /// [`DataError::InvalidRate`] if a rate is not a number.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

        let headers = rdr.headers()?.clone();
        for column in ["Currency", "Rate"] {
            if !headers.iter().any(|h| h == column) {
                return Err(DataError::Config(format!(
                    "exchange rate file has no {column:?} column"
                )));
            }
        }

        let mut table = Self::new();
        for row in rdr.deserialize::<RateRow>() {
            let row = row?;
            let rate = row.rate.parse::<f64>().map_err(|_| DataError::InvalidRate {
                currency: row.currency.clone(),
                value: row.rate.clone(),
            })?;
            table.insert(&row.currency, rate);
        }

        Ok(table)
    }

    fn insert(&mut self, code: &str, rate: f64) {
        self.rates
            .entry(code.trim().to_uppercase())
            .or_insert(rate);
    }

    /// Raw rate for a code, if present.
    pub fn get(&self, code: &str) -> Option<f64> {
        self.rates.get(&code.trim().to_uppercase()).copied()
    }

    /// Usable rate for a target currency.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::MissingRate`] if the code is absent and
    /// [`DataError::InvalidRate`] if the rate is not a positive finite number.
    pub fn require(&self, currency: TargetCurrency) -> Result<f64> {
        let rate = self
            .get(currency.code())
            .ok_or_else(|| DataError::MissingRate(currency.code().to_string()))?;

        if !rate.is_finite() || rate <= 0.0 {
            return Err(DataError::InvalidRate {
                currency: currency.code().to_string(),
                value: rate.to_string(),
            });
        }

        Ok(rate)
    }

    /// Number of currencies in the table.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Whether the table has no rates.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}
