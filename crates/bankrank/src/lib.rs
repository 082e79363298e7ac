#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/bankrank/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod pipeline;
pub mod query;
pub mod transform;

// Re-export sub-crates
pub use bankrank_data as data;
pub use bankrank_output as output;

pub use config::{PipelineConfig, SourceLocation};
pub use error::{PipelineError, Result};
pub use pipeline::{Pipeline, PipelineReport};
pub use query::{NamedQuery, OutputFormat, QueryRunner, office_queries, standard_queries};
pub use transform::{ConversionRates, convert_records};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
