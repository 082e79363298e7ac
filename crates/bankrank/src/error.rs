//! Pipeline error type.

use bankrank_data::{DataError, QueryError};
use bankrank_output::ExportError;
use thiserror::Error;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Fetch, extraction, rates or storage failure.
    #[error(transparent)]
    Data(#[from] DataError),

    /// A query was rejected or failed.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Writing the CSV sink failed.
    #[error("CSV sink failed: {0}")]
    Export(#[from] ExportError),

    /// Emitting query output failed.
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}
