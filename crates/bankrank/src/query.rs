//! Read-only queries over the stored result table.

use bankrank_data::{BankStore, QueryError, QueryResult};
use bankrank_output::{ExportFormat, Exporter, render_table};
use std::io::Write;

use crate::error::Result;

/// How query results are written to the operator's output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned text table.
    #[default]
    Text,
    /// One pretty-printed JSON document per query.
    Json,
}

/// A named query to run after loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedQuery {
    /// Short label used in logs.
    pub label: String,
    /// SQL text.
    pub sql: String,
}

impl NamedQuery {
    /// Create a named query.
    pub fn new(label: impl Into<String>, sql: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            sql: sql.into(),
        }
    }
}

/// Queries run at the end of every standard pipeline run.
pub fn standard_queries(table: &str) -> Vec<NamedQuery> {
    vec![
        NamedQuery::new("full table", format!("SELECT * FROM {table}")),
        NamedQuery::new("average GBP", format!("SELECT AVG(MC_GBP) FROM {table}")),
        NamedQuery::new("top 5 names", format!("SELECT Bank_Name FROM {table} LIMIT 5")),
    ]
}

/// Per-office reports: each office sees bank names in its local currency.
pub fn office_queries(table: &str) -> Vec<NamedQuery> {
    vec![
        NamedQuery::new("London office", format!("SELECT Bank_Name, MC_GBP FROM {table}")),
        NamedQuery::new("Berlin office", format!("SELECT Bank_Name, MC_EUR FROM {table}")),
        NamedQuery::new("New Delhi office", format!("SELECT Bank_Name, MC_INR FROM {table}")),
    ]
}

/// Runs read-only queries and echoes their results to a writer.
#[derive(Debug)]
pub struct QueryRunner<'a, W: Write> {
    store: &'a BankStore,
    out: W,
    format: OutputFormat,
}

impl<'a, W: Write> QueryRunner<'a, W> {
    /// Create a runner over an open store.
    pub const fn new(store: &'a BankStore, out: W, format: OutputFormat) -> Self {
        Self { store, out, format }
    }

    /// Execute `sql`, print the result and return it.
    ///
    /// # Errors
    ///
    /// Returns a query error if the statement writes or fails, and an I/O
    /// error if the result cannot be printed.
    pub fn run(&mut self, sql: &str) -> Result<QueryResult> {
        let result = self.store.run_query(sql)?;
        self.emit(&result)?;
        Ok(result)
    }

    /// Execute `sql` without printing.
    ///
    /// # Errors
    ///
    /// Returns a query error if the statement writes or fails.
    pub fn fetch(&self, sql: &str) -> std::result::Result<QueryResult, QueryError> {
        self.store.run_query(sql)
    }

    fn emit(&mut self, result: &QueryResult) -> Result<()> {
        match self.format {
            OutputFormat::Text => self.out.write_all(render_table(result).as_bytes())?,
            OutputFormat::Json => {
                let json = result.export_to_string(ExportFormat::PrettyJson)?;
                writeln!(self.out, "{json}")?;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    /// Give back the output writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}
