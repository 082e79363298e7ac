//! Tabular query results.

use rusqlite::types::ValueRef;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single value in a query result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// SQL NULL
    Null,
    /// Integer value
    Integer(i64),
    /// Floating point value
    Real(f64),
    /// Text value
    Text(String),
    /// Binary value
    Blob(Vec<u8>),
}

impl Cell {
    /// Numeric view of the cell, if it holds a number.
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(v) => Some(*v as f64),
            Self::Real(v) => Some(*v),
            _ => None,
        }
    }

    /// Text view of the cell, if it holds text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<ValueRef<'_>> for Cell {
    fn from(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => Self::Null,
            ValueRef::Integer(v) => Self::Integer(v),
            ValueRef::Real(v) => Self::Real(v),
            ValueRef::Text(t) => Self::Text(String::from_utf8_lossy(t).into_owned()),
            ValueRef::Blob(b) => Self::Blob(b.to_vec()),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Real(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
            Self::Blob(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

/// Rows returned by a query, with their column names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// The statement that produced this result.
    pub query: String,
    /// Column names in result order.
    pub columns: Vec<String>,
    /// Row values; each row has one cell per column.
    pub rows: Vec<Vec<Cell>>,
}

impl QueryResult {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the result has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All values of a named column.
    pub fn column(&self, name: &str) -> Option<Vec<&Cell>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().filter_map(|row| row.get(idx)).collect())
    }

    /// First cell of the first row; handy for aggregate queries.
    pub fn scalar(&self) -> Option<&Cell> {
        self.rows.first().and_then(|row| row.first())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> QueryResult {
        QueryResult {
            query: "SELECT Bank_Name, MC_GBP FROM t".to_string(),
            columns: vec!["Bank_Name".to_string(), "MC_GBP".to_string()],
            rows: vec![
                vec![Cell::Text("A".to_string()), Cell::Real(10.5)],
                vec![Cell::Text("B".to_string()), Cell::Integer(7)],
            ],
        }
    }

    #[test]
    fn test_column_lookup() {
        let result = sample();
        assert_eq!(result.len(), 2);
        assert_eq!(result.column_index("MC_GBP"), Some(1));
        assert!(result.column("missing").is_none());

        let values: Vec<f64> = result
            .column("MC_GBP")
            .unwrap()
            .into_iter()
            .filter_map(Cell::as_f64)
            .collect();
        assert_eq!(values, vec![10.5, 7.0]);
    }

    #[test]
    fn test_scalar() {
        assert_eq!(sample().scalar().and_then(Cell::as_str), Some("A"));
        assert!(QueryResult::default().scalar().is_none());
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(Cell::Null.to_string(), "NULL");
        assert_eq!(Cell::Integer(3).to_string(), "3");
        assert_eq!(Cell::Real(2.5).to_string(), "2.5");
        assert_eq!(Cell::Text("x".to_string()).to_string(), "x");
        assert_eq!(Cell::Blob(vec![1, 2]).to_string(), "<2 bytes>");
    }
}
