//! Bill model
//!
//! A bill is a single payable obligation: company, amount, due date and a
//! paid flag. Due dates are ISO `YYYY-MM-DD` strings on disk.

use crate::{Error, Result};
use crate::policy::DateParsing;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// On-disk date format
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Days ahead that still count as "due soon"
pub const DUE_SOON_DAYS: i64 = 30;

/// A bill's due date.
///
/// Strict parsing always yields `Date`. Lenient parsing keeps whatever the
/// user typed when it is not a valid date, so old databases still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DueDate {
    Date(NaiveDate),
    Raw(String),
}

impl DueDate {
    /// Parse user input according to the date policy.
    ///
    /// Lenient input is kept byte for byte unless it already is a
    /// canonical `YYYY-MM-DD` date.
    pub fn parse(input: &str, parsing: DateParsing) -> Result<Self> {
        match parsing {
            DateParsing::Strict => input.parse(),
            DateParsing::Lenient => Ok(Self::from_stored(input)),
        }
    }

    /// Interpret a value read back from the table. Only text that round-trips
    /// through the ISO format exactly counts as a date.
    pub fn from_stored(raw: &str) -> Self {
        match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
            Ok(date) if date.format(DATE_FORMAT).to_string() == raw => DueDate::Date(date),
            _ => DueDate::Raw(raw.to_string()),
        }
    }

    /// The parsed date, if there is one
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            DueDate::Date(d) => Some(*d),
            DueDate::Raw(_) => None,
        }
    }

    /// Text stored in the `due_date` column
    pub fn to_stored(&self) -> String {
        match self {
            DueDate::Date(d) => d.format(DATE_FORMAT).to_string(),
            DueDate::Raw(s) => s.clone(),
        }
    }

    /// Signed number of days from `today` until this date
    pub fn days_until(&self, today: NaiveDate) -> Option<i64> {
        self.date().map(|d| (d - today).num_days())
    }
}

impl FromStr for DueDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
            .map(DueDate::Date)
            .map_err(|_| Error::InvalidDate(s.trim().to_string()))
    }
}

impl std::fmt::Display for DueDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_stored())
    }
}

// Parsed dates sort before raw text; ISO text orders like the date itself.
impl Ord for DueDate {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (DueDate::Date(a), DueDate::Date(b)) => a.cmp(b),
            (DueDate::Date(_), DueDate::Raw(_)) => Ordering::Less,
            (DueDate::Raw(_), DueDate::Date(_)) => Ordering::Greater,
            (DueDate::Raw(a), DueDate::Raw(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for DueDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// How close a bill is to its due date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DueUrgency {
    /// Due date has passed
    Overdue,
    /// Due today or within the next 30 days
    DueSoon,
    /// More than 30 days away
    Later,
    /// Due date was stored unparsed
    Unknown,
}

impl DueUrgency {
    pub fn classify(due: &DueDate, today: NaiveDate) -> Self {
        match due.days_until(today) {
            None => DueUrgency::Unknown,
            Some(days) if days < 0 => DueUrgency::Overdue,
            Some(days) if days <= DUE_SOON_DAYS => DueUrgency::DueSoon,
            Some(_) => DueUrgency::Later,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DueUrgency::Overdue => "overdue",
            DueUrgency::DueSoon => "due soon",
            DueUrgency::Later => "later",
            DueUrgency::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for DueUrgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A bill record as stored in the `bills` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    /// Row id, assigned by the database
    pub id: i64,
    /// Who the bill is owed to
    pub company: String,
    /// Amount due, no currency unit
    pub amount: f64,
    pub due_date: DueDate,
    pub is_paid: bool,
}

impl Bill {
    /// Urgency relative to `today`
    pub fn urgency(&self, today: NaiveDate) -> DueUrgency {
        DueUrgency::classify(&self.due_date, today)
    }

    /// Whether an unpaid bill falls due on or before `today + window_days`
    pub fn due_within(&self, today: NaiveDate, window_days: u32) -> bool {
        self.due_date
            .days_until(today)
            .is_some_and(|days| days <= i64::from(window_days))
    }
}

/// Order bills for display: unpaid first, then by due date ascending.
pub fn sort_for_display(bills: &mut [Bill]) {
    bills.sort_by(|a, b| {
        a.is_paid
            .cmp(&b.is_paid)
            .then_with(|| a.due_date.cmp(&b.due_date))
    });
}

/// Parse an amount as typed by the user, tolerating a leading `$`.
pub fn parse_amount(input: &str) -> Result<f64> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix('$').unwrap_or(trimmed).trim();
    match digits.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(Error::InvalidNumber(trimmed.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    fn bill(id: i64, due: &str, is_paid: bool) -> Bill {
        Bill {
            id,
            company: format!("company-{}", id),
            amount: 10.0,
            due_date: DueDate::from_stored(due),
            is_paid,
        }
    }

    #[test]
    fn test_strict_parse_rejects_garbage() {
        assert!(matches!(
            DueDate::parse("next tuesday", DateParsing::Strict),
            Err(Error::InvalidDate(_))
        ));
        assert!(DueDate::parse("2024-02-30", DateParsing::Strict).is_err());
        assert_eq!(
            DueDate::parse(" 2024-02-29 ", DateParsing::Strict).unwrap(),
            DueDate::Date(date("2024-02-29"))
        );
    }

    #[test]
    fn test_lenient_parse_keeps_raw_text() {
        let due = DueDate::parse("end of month", DateParsing::Lenient).unwrap();
        assert_eq!(due, DueDate::Raw("end of month".to_string()));
        assert_eq!(due.to_stored(), "end of month");

        let parsed = DueDate::parse("2030-01-01", DateParsing::Lenient).unwrap();
        assert_eq!(parsed.date(), Some(date("2030-01-01")));
    }

    #[test]
    fn test_lenient_parse_does_not_normalize() {
        let short = DueDate::parse("2030-1-5", DateParsing::Lenient).unwrap();
        assert_eq!(short, DueDate::Raw("2030-1-5".to_string()));
        assert_eq!(short.date(), None);

        let padded = DueDate::parse("  2030-01-05 ", DateParsing::Lenient).unwrap();
        assert_eq!(padded.to_stored(), "  2030-01-05 ");
    }

    #[test]
    fn test_urgency_boundaries() {
        let today = date("2025-06-01");
        let classify = |s: &str| DueUrgency::classify(&DueDate::from_stored(s), today);

        assert_eq!(classify("2025-05-31"), DueUrgency::Overdue);
        assert_eq!(classify("2025-06-01"), DueUrgency::DueSoon);
        assert_eq!(classify("2025-07-01"), DueUrgency::DueSoon);
        assert_eq!(classify("2025-07-02"), DueUrgency::Later);
        assert_eq!(classify("someday"), DueUrgency::Unknown);
    }

    #[test]
    fn test_due_within_window() {
        let today = date("2025-06-01");
        assert!(bill(1, "2025-07-01", false).due_within(today, 30));
        assert!(!bill(2, "2025-07-16", false).due_within(today, 30));
        assert!(bill(3, "2020-01-01", false).due_within(today, 30));
        assert!(!bill(4, "soon", false).due_within(today, 30));
    }

    #[test]
    fn test_display_sort_unpaid_first_then_due_date() {
        let mut bills = vec![
            bill(1, "2025-01-10", true),
            bill(2, "2025-03-01", false),
            bill(3, "2025-01-01", true),
            bill(4, "2025-02-01", false),
        ];
        sort_for_display(&mut bills);
        let ids: Vec<i64> = bills.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![4, 2, 3, 1]);
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12.5").unwrap(), 12.5);
        assert_eq!(parse_amount(" $40 ").unwrap(), 40.0);
        assert!(matches!(parse_amount("ten"), Err(Error::InvalidNumber(_))));
        assert!(parse_amount("NaN").is_err());
        assert!(parse_amount("").is_err());
    }
}
