use crate::bill::Bill;
use crate::ui::{money, Theme};
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
pub struct BillRow {
    #[tabled(rename = "#")]
    pub rank: usize,
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "Company")]
    pub company: String,
    #[tabled(rename = "Amount")]
    pub amount: String,
    #[tabled(rename = "Due Date")]
    pub due_date: String,
    #[tabled(rename = "Paid")]
    pub paid: String,
}

impl BillRow {
    /// `rank` is the 1-based display position, independent of the stored id.
    pub fn new(rank: usize, bill: &Bill, today: NaiveDate, theme: &Theme) -> Self {
        let paid_style = theme.paid(bill.is_paid);
        let paid = if bill.is_paid { "Yes" } else { "No" };
        Self {
            rank,
            id: bill.id,
            company: bill.company.clone(),
            amount: money(bill.amount).style(paid_style).to_string(),
            due_date: bill
                .due_date
                .to_string()
                .style(theme.urgency(bill.urgency(today)))
                .to_string(),
            paid: paid.style(paid_style).to_string(),
        }
    }
}

/// Render bills in the order given
pub fn bill_table(bills: &[Bill], today: NaiveDate, theme: &Theme) -> String {
    if bills.is_empty() {
        return "No bills recorded.".style(theme.muted).to_string();
    }

    let rows: Vec<BillRow> = bills
        .iter()
        .enumerate()
        .map(|(i, bill)| BillRow::new(i + 1, bill, today, theme))
        .collect();

    Table::new(&rows).with(Style::rounded()).to_string()
}

pub fn total_line(total_owed: f64, theme: &Theme) -> String {
    format!("Total Amount Owed: {}", money(total_owed))
        .style(theme.total)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bill::DueDate;

    fn bill(id: i64, company: &str, amount: f64, due: &str, is_paid: bool) -> Bill {
        Bill {
            id,
            company: company.to_string(),
            amount,
            due_date: DueDate::from_stored(due),
            is_paid,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()
    }

    #[test]
    fn test_table_lists_every_bill() {
        let bills = vec![
            bill(3, "Water", 30.0, "2030-01-10", false),
            bill(7, "Rent", 1200.5, "2030-02-01", true),
        ];
        let table = bill_table(&bills, today(), &Theme::plain());

        assert!(table.contains("Company"));
        assert!(table.contains("Water"));
        assert!(table.contains("$1200.50"));
        assert!(table.contains("2030-02-01"));
        assert!(table.contains("Yes"));
        assert!(table.contains("No"));
    }

    #[test]
    fn test_rank_is_dense_when_ids_have_gaps() {
        let bills = vec![
            bill(4, "A", 1.0, "2030-01-10", false),
            bill(9, "B", 1.0, "2030-01-11", false),
        ];
        let rows: Vec<BillRow> = bills
            .iter()
            .enumerate()
            .map(|(i, b)| BillRow::new(i + 1, b, today(), &Theme::plain()))
            .collect();
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[1].rank, 2);
        assert_eq!(rows[1].id, 9);
    }

    #[test]
    fn test_empty_table_message() {
        assert_eq!(bill_table(&[], today(), &Theme::plain()), "No bills recorded.");
    }

    #[test]
    fn test_total_line_formats_two_decimals() {
        assert_eq!(total_line(60.0, &Theme::plain()), "Total Amount Owed: $60.00");
        assert_eq!(total_line(0.0, &Theme::plain()), "Total Amount Owed: $0.00");
    }
}
