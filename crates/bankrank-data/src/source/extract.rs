//! Extraction of the ranked bank table from HTML.
//!
//! The layout contract is deliberately narrow: the first `<tbody>` in the
//! document holds the ranking, and the first three `<td>` cells of each row
//! are rank, bank name and market cap (billions of USD). Anything else about
//! the page is ignored. If the source page changes shape, this is where it
//! breaks.
//!
//! Parsing follows the HTML5 tree-building rules, which insert an implicit
//! `<tbody>` into any `<table>` whose rows are written directly under it.
//! A page with a table but no explicit `<tbody>` is therefore read like any
//! other; only a page with no table at all fails with [`DataError::Parse`].
//!
//! Ranks are taken from the page as written. A row among the first N whose
//! rank is above N, or repeats an earlier rank, is kept unchanged, so the
//! ranks come out unique and within `1..=N` only when the source ranking is.

use crate::error::{DataError, Result};
use crate::record::BankRecord;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

/// A qualifying row that could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// Zero-based position among qualifying rows.
    pub row: usize,
    /// Why the row was dropped.
    pub reason: String,
}

/// Outcome of parsing a single table row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    /// Row parsed into a record.
    Parsed(BankRecord),
    /// Row dropped; the run continues.
    Skipped(SkippedRow),
}

/// Records extracted from a document plus the rows that were dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// Parsed records, ascending by rank.
    pub records: Vec<BankRecord>,
    /// Rows that were seen but could not be parsed.
    pub skipped: Vec<SkippedRow>,
}

/// Pulls the top-N ranked rows out of the first table body of a page.
#[derive(Debug, Clone, Copy)]
pub struct TableExtractor {
    limit: usize,
}

impl Default for TableExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TableExtractor {
    /// Number of rows collected when no limit is given.
    pub const DEFAULT_LIMIT: usize = 10;

    /// Create an extractor collecting [`Self::DEFAULT_LIMIT`] rows.
    pub const fn new() -> Self {
        Self::with_limit(Self::DEFAULT_LIMIT)
    }

    /// Create an extractor collecting at most `limit` rows.
    pub const fn with_limit(limit: usize) -> Self {
        Self { limit }
    }

    /// Maximum number of qualifying rows read.
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Extract ranked records from `markup`.
    ///
    /// Rows without any `<td>` (header rows) are not counted. Every other
    /// row counts toward the limit whether or not it parses, matching the
    /// "first N rows encountered" contract.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Parse`] if the document has no `<tbody>`.
    pub fn extract(&self, markup: &str) -> Result<Extraction> {
        let document = Html::parse_document(markup);
        let tbody_selector = selector("tbody")?;
        let cell_selector = selector("td")?;

        let tbody = document
            .select(&tbody_selector)
            .next()
            .ok_or_else(|| DataError::Parse("document contains no table body".to_string()))?;

        let mut extraction = Extraction::default();
        let mut seen = 0;

        for row in tbody
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|el| el.value().name() == "tr")
        {
            if seen >= self.limit {
                break;
            }

            let cells: Vec<String> = row.select(&cell_selector).map(cell_text).collect();
            if cells.is_empty() {
                continue;
            }

            match parse_row(seen, &cells) {
                RowOutcome::Parsed(record) => extraction.records.push(record),
                RowOutcome::Skipped(skipped) => {
                    warn!(row = skipped.row, reason = %skipped.reason, "dropping table row");
                    extraction.skipped.push(skipped);
                }
            }
            seen += 1;
        }

        extraction.records.sort_by_key(|r| r.rank);
        debug!(
            records = extraction.records.len(),
            skipped = extraction.skipped.len(),
            "table extraction finished"
        );

        Ok(extraction)
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| DataError::Parse(format!("bad selector {css:?}: {e}")))
}

/// Text of a cell with every text node trimmed and concatenated.
fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().map(str::trim).collect()
}

/// Turn the cells of one row into a record, or explain why not.
pub fn parse_row(row: usize, cells: &[String]) -> RowOutcome {
    let skip = |reason: String| RowOutcome::Skipped(SkippedRow { row, reason });

    let [rank, name, market_cap, ..] = cells else {
        return skip(format!("expected at least 3 cells, found {}", cells.len()));
    };

    let Some(rank) = parse_rank(rank) else {
        return skip(format!("rank {rank:?} is not a positive integer"));
    };

    let market_cap = match market_cap.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value,
        _ => return skip(format!("market cap {market_cap:?} is not a number")),
    };

    RowOutcome::Parsed(BankRecord::new(rank, name.as_str(), market_cap))
}

fn parse_rank(text: &str) -> Option<u32> {
    if let Ok(rank) = text.parse::<u32>() {
        return (rank >= 1).then_some(rank);
    }

    // "3.0" style ranks
    let value = text.parse::<f64>().ok()?;
    (value.fract() == 0.0 && value >= 1.0 && value <= f64::from(u32::MAX)).then(|| value as u32)
}
