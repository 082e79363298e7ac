//! Error types for data operations.

use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur during data operations.
#[derive(Debug, Error)]
pub enum DataError {
    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// HTTP error (non-success status)
    #[error("HTTP error: {0}")]
    Http(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Document parsing error
    #[error("Data parsing error: {0}")]
    Parse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Exchange rate missing for a required currency
    #[error("Exchange rate missing for currency {0}")]
    MissingRate(String),

    /// Exchange rate present but not usable
    #[error("Invalid exchange rate for {currency}: {value}")]
    InvalidRate {
        /// Currency code
        currency: String,
        /// Offending value as read
        value: String,
    },

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Table name is not a plain identifier
    #[error("Invalid table name: {0:?}")]
    InvalidTableName(String),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Query error
    #[error(transparent)]
    Query(#[from] QueryError),
}

/// Errors raised by the read-only query runner.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Statement would modify the database
    #[error("Query is not read-only: {0}")]
    NotReadOnly(String),

    /// SQLite rejected or failed the statement
    #[error("Query failed: {0}")]
    Sql(#[from] rusqlite::Error),
}
