//! Source document retrieval and ranked-table extraction.
//!
//! A run pulls markup from a [`DocumentSource`] and hands it to the
//! [`TableExtractor`]:
//!
//! ```no_run
//! use bankrank_data::source::{DocumentSource, HttpSource, TableExtractor};
//!
//! # fn example() -> bankrank_data::Result<()> {
//! let source = HttpSource::new("https://en.wikipedia.org/wiki/List_of_largest_banks")?;
//! let markup = source.fetch()?;
//! let extraction = TableExtractor::new().extract(&markup)?;
//! println!("{} banks, {} rows skipped", extraction.records.len(), extraction.skipped.len());
//! # Ok(())
//! # }
//! ```

pub mod extract;
pub mod fetch;

pub use extract::{Extraction, RowOutcome, SkippedRow, TableExtractor};
pub use fetch::{FileSource, HttpSource, StaticSource};

use crate::error::Result;

/// Anything that can produce the raw markup of the source page.
pub trait DocumentSource {
    /// Human-readable location of the document, used in logs.
    fn location(&self) -> &str;

    /// Retrieve the full document body.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be retrieved.
    fn fetch(&self) -> Result<String>;
}
