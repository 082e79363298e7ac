//! SQLite storage for the ranked bank table.

use super::query::{Cell, QueryResult};
use crate::error::{DataError, QueryError, Result};
use crate::record::ConvertedBankRecord;
use rusqlite::{Batch, Connection, params};
use std::path::Path;
use tracing::{debug, info};

/// SQLite handle holding the persisted result table.
///
/// One handle is opened per run and shared by the writer and every query;
/// the connection closes when the handle is dropped.
#[derive(Debug)]
pub struct BankStore {
    conn: Connection,
}

impl BankStore {
    /// Open (or create) a database file.
    ///
    /// # Arguments
    /// * `path` - Path to the SQLite database file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        info!(path = %path.as_ref().display(), "opened SQLite store");
        Ok(Self { conn })
    }

    /// Open an in-memory database (useful for testing).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Replace `table` with `records`.
    ///
    /// The table is dropped and recreated inside a single transaction, so
    /// prior contents and schema never survive and a failed write leaves
    /// the previous table in place.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::InvalidTableName`] if `table` is not a plain SQL
    /// identifier, or a database error if any statement fails.
    pub fn replace_table(&mut self, table: &str, records: &[ConvertedBankRecord]) -> Result<()> {
        validate_table_name(table)?;

        let tx = self.conn.transaction()?;
        tx.execute(&format!("DROP TABLE IF EXISTS \"{table}\""), [])?;
        tx.execute(
            &format!(
                "CREATE TABLE \"{table}\" (
                    Rank INTEGER,
                    Bank_Name TEXT,
                    MC_USD REAL,
                    MC_EUR REAL,
                    MC_GBP REAL,
                    MC_INR REAL
                )"
            ),
            [],
        )?;

        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO \"{table}\" (Rank, Bank_Name, MC_USD, MC_EUR, MC_GBP, MC_INR)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)"
            ))?;

            for record in records {
                stmt.execute(params![
                    record.rank,
                    record.name,
                    record.market_cap_usd,
                    record.market_cap_eur,
                    record.market_cap_gbp,
                    record.market_cap_inr,
                ])?;
            }
        }

        tx.commit()?;
        debug!(table, rows = records.len(), "replaced result table");
        Ok(())
    }

    /// Load every record from `table` in rank order.
    pub fn load_table(&self, table: &str) -> Result<Vec<ConvertedBankRecord>> {
        validate_table_name(table)?;

        let mut stmt = self.conn.prepare(&format!(
            "SELECT Rank, Bank_Name, MC_USD, MC_EUR, MC_GBP, MC_INR
             FROM \"{table}\" ORDER BY Rank ASC"
        ))?;

        let records = stmt
            .query_map([], |row| {
                Ok(ConvertedBankRecord {
                    rank: row.get(0)?,
                    name: row.get(1)?,
                    market_cap_usd: row.get(2)?,
                    market_cap_eur: row.get(3)?,
                    market_cap_gbp: row.get(4)?,
                    market_cap_inr: row.get(5)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// Run a single read-only statement and collect its rows.
    ///
    /// The statement is prepared first and executed only if it is the sole
    /// statement in `sql`, SQLite reports it cannot write, and it yields
    /// result columns. `INSERT`, `UPDATE`, `DELETE` and DDL fail the first
    /// test; `ATTACH`, `DETACH`, `BEGIN`, `COMMIT` and `SAVEPOINT` pass it
    /// but have no result columns.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::NotReadOnly`] for anything other than one pure
    /// read and [`QueryError::Sql`] if SQLite rejects the statement (for
    /// example a missing table or column).
    pub fn run_query(&self, sql: &str) -> std::result::Result<QueryResult, QueryError> {
        let not_read_only = || QueryError::NotReadOnly(sql.trim().to_string());

        let mut batch = Batch::new(&self.conn, sql);
        let Some(mut stmt) = batch.next()? else {
            return Err(not_read_only());
        };
        if batch.next()?.is_some() {
            return Err(not_read_only());
        }
        if !stmt.readonly() || stmt.column_count() == 0 {
            return Err(not_read_only());
        }

        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let width = columns.len();

        let mut rows = Vec::new();
        let mut cursor = stmt.query([])?;
        while let Some(row) = cursor.next()? {
            let mut values = Vec::with_capacity(width);
            for idx in 0..width {
                values.push(Cell::from(row.get_ref(idx)?));
            }
            rows.push(values);
        }

        debug!(query = sql, rows = rows.len(), "query executed");
        Ok(QueryResult {
            query: sql.to_string(),
            columns,
            rows,
        })
    }
}

/// Accept only `[A-Za-z_][A-Za-z0-9_]*`.
fn validate_table_name(table: &str) -> Result<()> {
    let mut chars = table.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid {
        Ok(())
    } else {
        Err(DataError::InvalidTableName(table.to_string()))
    }
}
