#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/bankrank/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod export;
pub mod progress;
pub mod table;

pub use export::{ExportError, ExportFormat, Exporter, read_records_csv, write_records_csv};
pub use progress::ProgressLog;
pub use table::render_table;
