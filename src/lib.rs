//! # Billtrack - personal bill tracker
//!
//! Records bills in a local SQLite file and answers "what do I owe?".
//!
//! Billtrack provides:
//! - A `Bill` model with strict or lenient due-date handling
//! - A SQLite-backed `BillStore` with a configurable `StorePolicy`
//! - An interactive numbered menu over any reader/writer pair
//! - Colored table rendering for the terminal

pub mod bill;
pub mod policy;
pub mod storage;
pub mod menu;
pub mod ui;
pub mod config;

// Re-exports for convenient access
pub use bill::{Bill, DueDate, DueUrgency};
pub use policy::{DateParsing, IdPolicy, PolicyPreset, StorePolicy};
pub use storage::{BillStore, UnpaidBills};

/// Result type alias for Billtrack operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Billtrack operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid number '{0}'")]
    InvalidNumber(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// Input errors are reported to the user and the session carries on.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Error::InvalidDate(_) | Error::InvalidNumber(_))
    }
}
