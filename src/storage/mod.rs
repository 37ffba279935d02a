//! Storage Layer - SQLite-backed persistence
//!
//! System of record is a single SQLite table:
//! - bills(id, company, amount, due_date, is_paid)

pub mod schema;
pub mod sqlite;

pub use sqlite::{BillStore, UnpaidBills};
