//! Relational storage for the result table.

pub mod query;
pub mod sqlite;

pub use query::{Cell, QueryResult};
pub use sqlite::BankStore;
