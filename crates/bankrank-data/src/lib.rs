#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/bankrank/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod rates;
pub mod record;
pub mod source;
pub mod store;

pub use error::{DataError, QueryError, Result};
pub use rates::{ExchangeRateTable, TargetCurrency};
pub use record::{BankRecord, ConvertedBankRecord, RESULT_COLUMNS, round_cents};
pub use source::{DocumentSource, Extraction, RowOutcome, SkippedRow, TableExtractor};
pub use store::{BankStore, Cell, QueryResult};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
