//! Currency conversion of extracted records.

use bankrank_data::{
    BankRecord, ConvertedBankRecord, ExchangeRateTable, Result, TargetCurrency, round_cents,
};
use tracing::debug;

/// Rates resolved for the three target currencies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionRates {
    /// USD to EUR.
    pub eur: f64,
    /// USD to GBP.
    pub gbp: f64,
    /// USD to INR.
    pub inr: f64,
}

impl ConversionRates {
    /// Resolve every target currency from a rate table.
    ///
    /// # Errors
    ///
    /// Returns `MissingRate` if a code is absent and `InvalidRate` if a rate
    /// is not a positive finite number.
    pub fn from_table(table: &ExchangeRateTable) -> Result<Self> {
        Ok(Self {
            eur: table.require(TargetCurrency::Eur)?,
            gbp: table.require(TargetCurrency::Gbp)?,
            inr: table.require(TargetCurrency::Inr)?,
        })
    }

    /// Rate for one currency.
    pub const fn rate(&self, currency: TargetCurrency) -> f64 {
        match currency {
            TargetCurrency::Eur => self.eur,
            TargetCurrency::Gbp => self.gbp,
            TargetCurrency::Inr => self.inr,
        }
    }

    /// Convert a single record.
    pub fn convert(&self, record: &BankRecord) -> ConvertedBankRecord {
        let usd = record.market_cap_usd;
        ConvertedBankRecord {
            rank: record.rank,
            name: record.name.clone(),
            market_cap_usd: usd,
            market_cap_eur: round_cents(usd * self.rate(TargetCurrency::Eur)),
            market_cap_gbp: round_cents(usd * self.rate(TargetCurrency::Gbp)),
            market_cap_inr: round_cents(usd * self.rate(TargetCurrency::Inr)),
        }
    }
}

/// Convert every record into EUR, GBP and INR.
///
/// All rates are validated before any record is touched, so a bad rate
/// table fails the whole batch. The input is left as it was.
///
/// # Errors
///
/// Returns `MissingRate` or `InvalidRate` from [`ConversionRates::from_table`].
pub fn convert_records(
    records: &[BankRecord],
    table: &ExchangeRateTable,
) -> Result<Vec<ConvertedBankRecord>> {
    let rates = ConversionRates::from_table(table)?;
    debug!(eur = rates.eur, gbp = rates.gbp, inr = rates.inr, "converting market caps");
    Ok(records.iter().map(|r| rates.convert(r)).collect())
}
