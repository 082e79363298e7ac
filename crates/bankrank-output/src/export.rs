//! Export of converted records and query results.
//!
//! The record CSV is the flat-file sink of the pipeline. Its layout is fixed:
//! header `Rank,Bank_Name,MC_USD,MC_EUR,MC_GBP,MC_INR`, one row per bank,
//! rank ascending, and the file is overwritten on every write.

use bankrank_data::{Cell, ConvertedBankRecord, QueryResult};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Output was not valid UTF-8.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export data to a file in the specified format, replacing the file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

fn finish_csv(wtr: csv::Writer<Vec<u8>>) -> Result<String, ExportError> {
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(bytes).map_err(|e| ExportError::InvalidFormat(e.to_string()))
}

impl Exporter for [ConvertedBankRecord] {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => {
                let mut wtr = csv::Writer::from_writer(vec![]);
                if self.is_empty() {
                    // serialize() only emits the header alongside a first row
                    wtr.write_record(bankrank_data::RESULT_COLUMNS)?;
                }
                for record in self {
                    wtr.serialize(record)?;
                }
                finish_csv(wtr)
            }
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

impl Exporter for QueryResult {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => {
                let mut wtr = csv::Writer::from_writer(vec![]);
                wtr.write_record(&self.columns)?;
                for row in &self.rows {
                    wtr.write_record(row.iter().map(|cell| match cell {
                        Cell::Null => String::new(),
                        other => other.to_string(),
                    }))?;
                }
                finish_csv(wtr)
            }
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

/// Write records to `path` as CSV, overwriting any existing file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_records_csv(path: &Path, records: &[ConvertedBankRecord]) -> Result<(), ExportError> {
    records.export_to_file(path, ExportFormat::Csv)?;
    debug!(path = %path.display(), rows = records.len(), "wrote record CSV");
    Ok(())
}

/// Read records back from a CSV written by [`write_records_csv`].
///
/// # Errors
///
/// Returns an error if the file cannot be read or a row does not match the
/// record layout.
pub fn read_records_csv(path: &Path) -> Result<Vec<ConvertedBankRecord>, ExportError> {
    let mut rdr = csv::Reader::from_path(path)?;
    let records = rdr
        .deserialize::<ConvertedBankRecord>()
        .collect::<Result<Vec<_>, _>>()?;
    Ok(records)
}
