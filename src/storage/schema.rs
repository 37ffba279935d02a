//! Database schema definitions

/// SQL to create the bills table.
///
/// `due_date` is ISO `YYYY-MM-DD` text, `is_paid` is 0/1.
pub const CREATE_BILLS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS bills (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    company TEXT,
    amount REAL,
    due_date TEXT,
    is_paid INTEGER DEFAULT 0
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_bills_unpaid ON bills(is_paid, due_date)",
];

/// Column list shared by every bill query
pub const BILL_COLUMNS: &str = "id, company, amount, due_date, is_paid";

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![CREATE_BILLS_TABLE];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
