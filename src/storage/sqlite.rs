//! SQLite storage implementation

use std::path::Path;
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, params, OptionalExtension};
use crate::bill::{Bill, DueDate};
use crate::policy::{IdPolicy, StorePolicy};
use crate::Result;
use super::schema::{self, BILL_COLUMNS};

/// SQLite-backed store for bills.
///
/// Every call commits before returning. Operations on an id that does not
/// exist touch nothing and succeed.
pub struct BillStore {
    conn: Connection,
    policy: StorePolicy,
}

/// Result of an unpaid listing
#[derive(Debug, Clone, PartialEq)]
pub struct UnpaidBills {
    pub bills: Vec<Bill>,
    pub total_owed: f64,
}

impl BillStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path, policy: StorePolicy) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn, policy };
        store.initialize_schema()?;
        tracing::info!("Opened bill store at {}", path.display());
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory(policy: StorePolicy) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn, policy };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    pub fn policy(&self) -> &StorePolicy {
        &self.policy
    }

    /// Close the connection, reporting any error SQLite raises on the way out
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| e.into())
    }

    // ========== Create / Read ==========

    /// Add an unpaid bill and return its id
    pub fn create(&self, company: &str, amount: f64, due_date: &str) -> Result<i64> {
        let due = DueDate::parse(due_date, self.policy.date_parsing)?;
        self.conn.execute(
            "INSERT INTO bills (company, amount, due_date) VALUES (?1, ?2, ?3)",
            params![company, amount, due.to_stored()],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!("Created bill {} ({}, {:.2}, {})", id, company, amount, due);
        Ok(id)
    }

    /// Get a bill by id
    pub fn get(&self, id: i64) -> Result<Option<Bill>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM bills WHERE id = ?1", BILL_COLUMNS),
                [id],
                row_to_bill,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Every bill, in table order
    pub fn list_all(&self) -> Result<Vec<Bill>> {
        self.query_bills(&format!("SELECT {} FROM bills", BILL_COLUMNS))
    }

    /// Unpaid bills due within `window_days` of today (all unpaid bills when
    /// `None`), together with the total owed
    pub fn list_unpaid(&self, window_days: Option<u32>) -> Result<UnpaidBills> {
        self.list_unpaid_as_of(window_days, Local::now().date_naive())
    }

    /// Same as [`list_unpaid`](Self::list_unpaid) with an explicit "today"
    pub fn list_unpaid_as_of(&self, window_days: Option<u32>, today: NaiveDate) -> Result<UnpaidBills> {
        let mut bills = self.query_bills(&format!(
            "SELECT {} FROM bills WHERE is_paid = 0",
            BILL_COLUMNS
        ))?;

        if let Some(days) = window_days {
            bills.retain(|b| b.due_within(today, days));
        }

        let total_owed = if window_days.is_some() && self.policy.window_limits_total {
            bills.iter().map(|b| b.amount).sum::<f64>()
        } else {
            self.total_owed()?
        };

        Ok(UnpaidBills { bills, total_owed })
    }

    /// Sum of all unpaid amounts, 0.0 when nothing is owed
    pub fn total_owed(&self) -> Result<f64> {
        let total: f64 = self.conn.query_row(
            "SELECT COALESCE(SUM(amount), 0.0) FROM bills WHERE is_paid = 0",
            [],
            |row| row.get(0),
        )?;
        Ok(total)
    }

    /// Count all bills
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM bills", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn query_bills(&self, sql: &str) -> Result<Vec<Bill>> {
        let mut stmt = self.conn.prepare(sql)?;
        let bills = stmt
            .query_map([], row_to_bill)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(bills)
    }

    // ========== Update ==========

    /// Mark a bill as paid. Returns the number of rows touched (0 or 1).
    pub fn mark_paid(&self, id: i64) -> Result<usize> {
        self.set_paid(id, true)
    }

    /// Mark a bill as unpaid. Returns the number of rows touched (0 or 1).
    pub fn mark_unpaid(&self, id: i64) -> Result<usize> {
        self.set_paid(id, false)
    }

    fn set_paid(&self, id: i64, is_paid: bool) -> Result<usize> {
        let changed = self.conn.execute(
            "UPDATE bills SET is_paid = ?1 WHERE id = ?2",
            params![is_paid, id],
        )?;
        tracing::debug!("Set bill {} paid={} ({} row(s))", id, is_paid, changed);
        Ok(changed)
    }

    /// Move a bill's due date. Reopens the bill when the policy says so.
    pub fn update_due_date(&self, id: i64, due_date: &str) -> Result<usize> {
        let due = DueDate::parse(due_date, self.policy.date_parsing)?;
        let sql = if self.policy.reopen_on_due_date_change {
            "UPDATE bills SET due_date = ?1, is_paid = 0 WHERE id = ?2"
        } else {
            "UPDATE bills SET due_date = ?1 WHERE id = ?2"
        };
        let changed = self.conn.execute(sql, params![due.to_stored(), id])?;
        tracing::debug!("Bill {} due date -> {} ({} row(s))", id, due, changed);
        Ok(changed)
    }

    pub fn update_company(&self, id: i64, company: &str) -> Result<usize> {
        let changed = self.conn.execute(
            "UPDATE bills SET company = ?1 WHERE id = ?2",
            params![company, id],
        )?;
        tracing::debug!("Bill {} company -> {} ({} row(s))", id, company, changed);
        Ok(changed)
    }

    pub fn update_amount(&self, id: i64, amount: f64) -> Result<usize> {
        let changed = self.conn.execute(
            "UPDATE bills SET amount = ?1 WHERE id = ?2",
            params![amount, id],
        )?;
        tracing::debug!("Bill {} amount -> {:.2} ({} row(s))", id, amount, changed);
        Ok(changed)
    }

    // ========== Delete ==========

    /// Remove a bill. Under [`IdPolicy::Renumber`] every later bill moves
    /// down one id, in the same transaction.
    pub fn remove(&self, id: i64) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        let removed = tx.execute("DELETE FROM bills WHERE id = ?1", [id])?;
        if removed > 0 && self.policy.id_policy == IdPolicy::Renumber {
            let shifted = tx.execute("UPDATE bills SET id = id - 1 WHERE id > ?1", [id])?;
            tracing::debug!("Renumbered {} bill(s) after removing {}", shifted, id);
        }
        tx.commit()?;
        tracing::debug!("Removed bill {} ({} row(s))", id, removed);
        Ok(removed)
    }
}

/// Helper to convert a row to a Bill
fn row_to_bill(row: &rusqlite::Row) -> rusqlite::Result<Bill> {
    let company: Option<String> = row.get(1)?;
    let amount: Option<f64> = row.get(2)?;
    let due_date: Option<String> = row.get(3)?;
    let is_paid: Option<bool> = row.get(4)?;

    Ok(Bill {
        id: row.get(0)?,
        company: company.unwrap_or_default(),
        amount: amount.unwrap_or(0.0),
        due_date: DueDate::from_stored(due_date.as_deref().unwrap_or_default()),
        is_paid: is_paid.unwrap_or(false),
    })
}
