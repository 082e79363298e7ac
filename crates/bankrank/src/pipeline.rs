//! The extract, transform, load and query run.
//!
//! Stages run strictly in order on the calling thread:
//!
//! 1. fetch the source document and extract the top-N table rows
//! 2. load exchange rates and convert every record
//! 3. write the CSV sink
//! 4. open the SQLite store, replace the result table, run the queries
//!
//! A progress line is appended to the log file at every stage boundary.
//! The two sinks are independent: if the database step fails after the CSV
//! was written, the CSV stays. A failed run must simply be run again.

use crate::config::{PipelineConfig, SourceLocation};
use crate::error::Result;
use crate::query::QueryRunner;
use crate::transform::convert_records;
use bankrank_data::source::{DocumentSource, FileSource, HttpSource};
use bankrank_data::{
    BankStore, ConvertedBankRecord, ExchangeRateTable, QueryResult, SkippedRow, TableExtractor,
};
use bankrank_output::{ProgressLog, write_records_csv};
use std::io::Write;
use tracing::{info, warn};

/// Progress messages written at each stage boundary.
pub mod messages {
    /// Before anything runs.
    pub const START: &str = "Preliminaries complete. Initiating ETL process";
    /// Before fetching.
    pub const EXTRACT_STARTED: &str = "Extraction started";
    /// After extraction.
    pub const EXTRACTED: &str = "Data extraction complete. Initiating Transformation process";
    /// After conversion.
    pub const TRANSFORMED: &str = "Data transformation complete. Initiating Loading process";
    /// After the CSV sink.
    pub const CSV_SAVED: &str = "Data saved to CSV file";
    /// After opening the store.
    pub const DB_CONNECTED: &str = "SQL Connection initiated";
    /// After the database sink.
    pub const DB_LOADED: &str = "Data loaded to Database as a table, Executing queries";
    /// After the last query.
    pub const COMPLETE: &str = "Process complete";
    /// After the store is closed.
    pub const DB_CLOSED: &str = "Server Connection closed";
}

/// What a successful run produced.
#[derive(Debug, Clone, Default)]
pub struct PipelineReport {
    /// Converted records, as written to both sinks.
    pub records: Vec<ConvertedBankRecord>,
    /// Source rows dropped during extraction.
    pub skipped: Vec<SkippedRow>,
    /// Query results, in configured order.
    pub query_results: Vec<QueryResult>,
}

/// A configured ETL run.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    log: ProgressLog,
}

impl Pipeline {
    /// Create a pipeline from a configuration.
    pub fn new(config: PipelineConfig) -> Self {
        let log = ProgressLog::new(&config.log_path);
        Self { config, log }
    }

    /// The configuration in use.
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run against the source named in the configuration.
    ///
    /// # Errors
    ///
    /// See [`Pipeline::run`].
    pub fn run_configured<W: Write>(&self, out: W) -> Result<PipelineReport> {
        let source: Box<dyn DocumentSource> = match &self.config.source {
            SourceLocation::Url(url) => Box::new(HttpSource::with_timeout(
                url.as_str(),
                self.config.timeout,
            )?),
            SourceLocation::File(path) => Box::new(FileSource::new(path)),
        };
        self.run(source.as_ref(), out)
    }

    /// Run every stage, printing query results to `out`.
    ///
    /// # Errors
    ///
    /// Fails fast on the first fetch, extraction, rate, sink or query
    /// error. Rate errors are raised before either sink is written.
    pub fn run<W: Write>(&self, source: &dyn DocumentSource, out: W) -> Result<PipelineReport> {
        let config = &self.config;
        self.log.log(messages::START);

        self.log.log(messages::EXTRACT_STARTED);
        let extractor = TableExtractor::with_limit(config.top_n);
        info!(
            source = source.location(),
            limit = extractor.limit(),
            "extracting ranked table"
        );
        let markup = source.fetch()?;
        let extraction = extractor.extract(&markup)?;
        if !extraction.skipped.is_empty() {
            warn!(count = extraction.skipped.len(), "rows dropped during extraction");
        }
        self.log.log(messages::EXTRACTED);

        let rates = ExchangeRateTable::from_csv_path(&config.rates_path)?;
        let records = convert_records(&extraction.records, &rates)?;
        info!(banks = records.len(), "converted market caps");
        self.log.log(messages::TRANSFORMED);

        write_records_csv(&config.csv_path, &records)?;
        info!(path = %config.csv_path.display(), "CSV sink written");
        self.log.log(messages::CSV_SAVED);

        let query_results = {
            let mut store = BankStore::open(&config.db_path)?;
            self.log.log(messages::DB_CONNECTED);

            store.replace_table(&config.table_name, &records)?;
            info!(table = %config.table_name, "database sink written");
            self.log.log(messages::DB_LOADED);

            let mut runner = QueryRunner::new(&store, out, config.output_format);
            let mut results = Vec::with_capacity(config.queries.len());
            for query in &config.queries {
                info!(label = %query.label, "running query");
                results.push(runner.run(&query.sql)?);
            }
            self.log.log(messages::COMPLETE);
            results
        };
        self.log.log(messages::DB_CLOSED);

        Ok(PipelineReport {
            records,
            skipped: extraction.skipped,
            query_results,
        })
    }
}
