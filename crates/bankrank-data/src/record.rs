//! Bank records produced by extraction and currency conversion.

use serde::{Deserialize, Serialize};

/// Round a monetary value to 2 decimal places.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// A ranked bank as extracted from the source table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankRecord {
    /// Rank by market capitalization (1 = largest).
    pub rank: u32,
    /// Bank name.
    pub name: String,
    /// Market capitalization in billions of USD.
    pub market_cap_usd: f64,
}

impl BankRecord {
    /// Create a new record; the market cap is rounded to cents.
    pub fn new(rank: u32, name: impl Into<String>, market_cap_usd: f64) -> Self {
        Self {
            rank,
            name: name.into(),
            market_cap_usd: round_cents(market_cap_usd),
        }
    }
}

/// A bank record with market cap converted into the target currencies.
///
/// Field order and serialized names match the CSV and database column
/// layout: `Rank,Bank_Name,MC_USD,MC_EUR,MC_GBP,MC_INR`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertedBankRecord {
    /// Rank by market capitalization.
    #[serde(rename = "Rank")]
    pub rank: u32,
    /// Bank name.
    #[serde(rename = "Bank_Name")]
    pub name: String,
    /// Market cap in USD.
    #[serde(rename = "MC_USD")]
    pub market_cap_usd: f64,
    /// Market cap in EUR.
    #[serde(rename = "MC_EUR")]
    pub market_cap_eur: f64,
    /// Market cap in GBP.
    #[serde(rename = "MC_GBP")]
    pub market_cap_gbp: f64,
    /// Market cap in INR.
    #[serde(rename = "MC_INR")]
    pub market_cap_inr: f64,
}

/// Column names of the persisted result table, in order.
pub const RESULT_COLUMNS: [&str; 6] = ["Rank", "Bank_Name", "MC_USD", "MC_EUR", "MC_GBP", "MC_INR"];
