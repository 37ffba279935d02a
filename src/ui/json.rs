use crate::bill::Bill;
use chrono::NaiveDate;
use serde_json::{json, Value};

/// Bills as JSON objects, each tagged with its urgency relative to `today`
pub fn bill_entries(bills: &[Bill], today: NaiveDate) -> Vec<Value> {
    bills
        .iter()
        .map(|bill| {
            json!({
                "id": bill.id,
                "company": bill.company,
                "amount": bill.amount,
                "due_date": bill.due_date.to_stored(),
                "is_paid": bill.is_paid,
                "urgency": bill.urgency(today).to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bill::DueDate;

    #[test]
    fn test_entries_carry_urgency() {
        let today = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        let bills = vec![
            Bill {
                id: 1,
                company: "Water".to_string(),
                amount: 30.0,
                due_date: DueDate::from_stored("2029-12-20"),
                is_paid: false,
            },
            Bill {
                id: 4,
                company: "Gym".to_string(),
                amount: 25.0,
                due_date: DueDate::from_stored("whenever"),
                is_paid: true,
            },
        ];

        let entries = bill_entries(&bills, today);
        assert_eq!(entries[0]["urgency"], "overdue");
        assert_eq!(entries[0]["due_date"], "2029-12-20");
        assert_eq!(entries[1]["urgency"], "unknown");
        assert_eq!(entries[1]["is_paid"], true);
        assert_eq!(entries[1]["id"], 4);
    }
}
