//! Run configuration.

use crate::query::{NamedQuery, OutputFormat, office_queries, standard_queries};
use std::path::PathBuf;
use std::time::Duration;

/// Archived copy of the Wikipedia "List of largest banks" article.
pub const DEFAULT_SOURCE_URL: &str =
    "https://web.archive.org/web/20230908091635/https://en.wikipedia.org/wiki/List_of_largest_banks";

/// Default exchange-rate file.
pub const DEFAULT_RATES_PATH: &str = "exchange_rate.csv";

/// Default CSV output file.
pub const DEFAULT_CSV_PATH: &str = "top_10_banks.csv";

/// Default SQLite database file.
pub const DEFAULT_DB_PATH: &str = "Banks.db";

/// Default result table name.
pub const DEFAULT_TABLE_NAME: &str = "Largest_banks";

/// Default progress log file.
pub const DEFAULT_LOG_PATH: &str = "code_log_top_10_banks.txt";

/// Default number of banks kept.
pub const DEFAULT_TOP_N: usize = 10;

/// Where the source document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    /// Fetch over HTTP(S).
    Url(String),
    /// Read a saved page from disk.
    File(PathBuf),
}

/// Every location and limit a run needs.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Source document.
    pub source: SourceLocation,
    /// HTTP request timeout.
    pub timeout: Duration,
    /// Exchange-rate CSV.
    pub rates_path: PathBuf,
    /// CSV sink path.
    pub csv_path: PathBuf,
    /// SQLite database path.
    pub db_path: PathBuf,
    /// Result table name.
    pub table_name: String,
    /// Progress log path.
    pub log_path: PathBuf,
    /// Number of table rows read.
    pub top_n: usize,
    /// Queries run after loading, in order.
    pub queries: Vec<NamedQuery>,
    /// Output format for query results.
    pub output_format: OutputFormat,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source: SourceLocation::Url(DEFAULT_SOURCE_URL.to_string()),
            timeout: bankrank_data::source::fetch::DEFAULT_TIMEOUT,
            rates_path: PathBuf::from(DEFAULT_RATES_PATH),
            csv_path: PathBuf::from(DEFAULT_CSV_PATH),
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            table_name: DEFAULT_TABLE_NAME.to_string(),
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            top_n: DEFAULT_TOP_N,
            queries: standard_queries(DEFAULT_TABLE_NAME),
            output_format: OutputFormat::Text,
        }
    }
}

impl PipelineConfig {
    /// Use a different table and regenerate the standard queries for it.
    pub fn with_table_name(mut self, table: impl Into<String>) -> Self {
        self.table_name = table.into();
        self.queries = standard_queries(&self.table_name);
        self
    }

    /// Append the per-office currency reports to the query list.
    pub fn with_office_queries(mut self) -> Self {
        self.queries.extend(office_queries(&self.table_name));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.table_name, "Largest_banks");
        assert_eq!(config.top_n, 10);
        assert_eq!(config.csv_path, PathBuf::from("top_10_banks.csv"));
        assert_eq!(config.queries.len(), 3);
        assert_eq!(config.queries[1].sql, "SELECT AVG(MC_GBP) FROM Largest_banks");
    }

    #[test]
    fn test_table_name_rewrites_queries() {
        let config = PipelineConfig::default()
            .with_table_name("banks_q3")
            .with_office_queries();
        assert_eq!(config.queries.len(), 6);
        assert!(config.queries.iter().all(|q| q.sql.contains("banks_q3")));
    }
}
