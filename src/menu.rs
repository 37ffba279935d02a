//! Interactive menu
//!
//! A numbered main menu plus a per-bill action menu, driven line by line
//! from any reader and written to any writer. End of input exits cleanly.

use std::io::{BufRead, Write};
use chrono::{Local, NaiveDate};
use owo_colors::OwoColorize;
use crate::bill::{self, Bill};
use crate::storage::BillStore;
use crate::ui::{self, Icons, Theme};
use crate::{Error, Result};

/// A titled list of numbered choices
pub struct Menu {
    title: String,
    items: Vec<String>,
}

impl Menu {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            items: Vec::new(),
        }
    }

    pub fn items(mut self, items: &[&str]) -> Self {
        self.items.extend(items.iter().map(|s| s.to_string()));
        self
    }

    pub fn render(&self, theme: &Theme) -> String {
        let mut out = format!("\n{}\n\n", self.title.style(theme.header));
        for (i, item) in self.items.iter().enumerate() {
            let key = format!("{}.", i + 1);
            out.push_str(&format!("{} {}\n", key.style(theme.key), item));
        }
        out
    }

    /// Map a typed choice to a 0-based item index
    pub fn choose(&self, input: &str) -> Option<usize> {
        match input.trim().parse::<usize>() {
            Ok(n) if (1..=self.items.len()).contains(&n) => Some(n - 1),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MainChoice {
    Add,
    View,
    ViewUnpaid,
    Modify,
    Exit,
}

const MAIN_CHOICES: [MainChoice; 5] = [
    MainChoice::Add,
    MainChoice::View,
    MainChoice::ViewUnpaid,
    MainChoice::Modify,
    MainChoice::Exit,
];

fn main_menu() -> Menu {
    Menu::new("What would you like to do?").items(&[
        "Add a bill",
        "View bills",
        "View unpaid bills",
        "Modify a bill",
        "Exit",
    ])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BillAction {
    MarkPaid,
    MarkUnpaid,
    ChangeDueDate,
    ChangeCompany,
    ChangeAmount,
    Remove,
    Back,
}

const BILL_ACTIONS: [BillAction; 7] = [
    BillAction::MarkPaid,
    BillAction::MarkUnpaid,
    BillAction::ChangeDueDate,
    BillAction::ChangeCompany,
    BillAction::ChangeAmount,
    BillAction::Remove,
    BillAction::Back,
];

fn action_menu() -> Menu {
    Menu::new("Select an action:").items(&[
        "Mark as paid",
        "Mark as unpaid",
        "Change due date",
        "Change company name",
        "Change amount due",
        "Remove bill",
        "Return to main menu",
    ])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// One interactive session against a borrowed store
pub struct Session<'a, R, W> {
    store: &'a BillStore,
    input: R,
    output: W,
    theme: Theme,
    today: NaiveDate,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(store: &'a BillStore, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
            theme: ui::theme().clone(),
            today: Local::now().date_naive(),
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Pin "today" for due-date coloring and the unpaid window
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Consume the session and hand back the writer
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run the main loop until the user exits or input runs out
    pub fn run(&mut self) -> Result<()> {
        let menu = main_menu();
        loop {
            write!(self.output, "{}", menu.render(&self.theme))?;
            let Some(line) = self.prompt("Enter your choice:")? else {
                break;
            };

            let Some(choice) = menu.choose(&line).map(|i| MAIN_CHOICES[i]) else {
                writeln!(self.output, "Invalid choice. Please try again.")?;
                continue;
            };

            let flow = match choice {
                MainChoice::Add => self.add_bill(),
                MainChoice::View => self.view_bills().map(|_| Flow::Continue),
                MainChoice::ViewUnpaid => self.view_unpaid().map(|_| Flow::Continue),
                MainChoice::Modify => self.modify_bill(),
                MainChoice::Exit => Ok(Flow::Exit),
            };

            match flow {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(e) if e.is_input_error() => {
                    tracing::debug!("Rejected input: {}", e);
                    self.report_error(&e)?;
                }
                Err(e) => return Err(e),
            }
        }

        writeln!(self.output, "Exiting the bill tracker. {}", Icons::WAVE)?;
        Ok(())
    }

    fn add_bill(&mut self) -> Result<Flow> {
        let Some(company) = self.prompt("Enter the company name:")? else {
            return Ok(Flow::Exit);
        };
        let Some(amount) = self.prompt("Enter the bill amount:")? else {
            return Ok(Flow::Exit);
        };
        let amount = bill::parse_amount(&amount)?;
        let Some(due_date) = self.prompt("Enter the due date (YYYY-MM-DD):")? else {
            return Ok(Flow::Exit);
        };

        let id = self.store.create(company.trim(), amount, &due_date)?;
        let message = format!("Bill {} added.", id);
        writeln!(self.output, "\n{} {}", Icons::CHECK, message.style(self.theme.success))?;
        Ok(Flow::Continue)
    }

    fn view_bills(&mut self) -> Result<()> {
        let mut bills = self.store.list_all()?;
        bill::sort_for_display(&mut bills);
        let total = self.store.total_owed()?;
        self.write_table(&bills)?;
        writeln!(self.output, "{}", ui::total_line(total, &self.theme))?;
        Ok(())
    }

    fn view_unpaid(&mut self) -> Result<()> {
        let window = self.store.policy().unpaid_window_days;
        let mut unpaid = self.store.list_unpaid_as_of(window, self.today)?;
        bill::sort_for_display(&mut unpaid.bills);

        if let Some(days) = window {
            let title = format!("Unpaid bills due within {} days", days);
            writeln!(self.output, "{} {}", Icons::CALENDAR, title.style(self.theme.header))?;
        }
        self.write_table(&unpaid.bills)?;
        writeln!(self.output, "{}", ui::total_line(unpaid.total_owed, &self.theme))?;
        Ok(())
    }

    fn modify_bill(&mut self) -> Result<Flow> {
        let mut bills = self.store.list_all()?;
        bill::sort_for_display(&mut bills);
        self.write_table(&bills)?;

        let Some(line) = self.prompt("Please enter a bill ID (0 to go back):")? else {
            return Ok(Flow::Exit);
        };
        let trimmed = line.trim();
        let id: i64 = trimmed
            .parse()
            .map_err(|_| Error::InvalidNumber(trimmed.to_string()))?;
        if id == 0 {
            return Ok(Flow::Continue);
        }

        let Some(selected) = self.store.get(id)? else {
            writeln!(self.output, "Bill ID not found. Please enter a valid bill ID.")?;
            return Ok(Flow::Continue);
        };
        self.write_table(std::slice::from_ref(&selected))?;

        let menu = action_menu();
        loop {
            write!(self.output, "{}", menu.render(&self.theme))?;
            let Some(line) = self.prompt("Enter your choice:")? else {
                return Ok(Flow::Exit);
            };
            let Some(action) = menu.choose(&line).map(|i| BILL_ACTIONS[i]) else {
                writeln!(self.output, "Invalid choice. Please try again.")?;
                continue;
            };
            return self.apply_action(id, action);
        }
    }

    fn apply_action(&mut self, id: i64, action: BillAction) -> Result<Flow> {
        let (icon, message, style) = match action {
            BillAction::MarkPaid => {
                self.store.mark_paid(id)?;
                (Icons::CHECK, format!("Bill {} marked as paid.", id), self.theme.success)
            }
            BillAction::MarkUnpaid => {
                self.store.mark_unpaid(id)?;
                (Icons::MOD, format!("Bill {} marked as unpaid.", id), self.theme.error)
            }
            BillAction::ChangeDueDate => {
                let Some(due) = self.prompt("Enter the new due date (YYYY-MM-DD):")? else {
                    return Ok(Flow::Exit);
                };
                self.store.update_due_date(id, &due)?;
                (Icons::CALENDAR, format!("Bill {} due date changed.", id), self.theme.warn)
            }
            BillAction::ChangeCompany => {
                let Some(name) = self.prompt("Enter the new company name:")? else {
                    return Ok(Flow::Exit);
                };
                self.store.update_company(id, name.trim())?;
                (Icons::MOD, format!("Bill {} company name changed.", id), self.theme.warn)
            }
            BillAction::ChangeAmount => {
                let Some(amount) = self.prompt("Enter the new amount due: $")? else {
                    return Ok(Flow::Exit);
                };
                let amount = bill::parse_amount(&amount)?;
                self.store.update_amount(id, amount)?;
                (Icons::MONEY, format!("Bill {} balance changed.", id), self.theme.warn)
            }
            BillAction::Remove => {
                self.store.remove(id)?;
                (Icons::DEL, format!("Bill {} removed.", id), self.theme.error)
            }
            BillAction::Back => return Ok(Flow::Continue),
        };

        writeln!(self.output, "\n{} {}\n", icon, message.style(style))?;
        if action != BillAction::Remove {
            if let Some(updated) = self.store.get(id)? {
                self.write_table(std::slice::from_ref(&updated))?;
            }
        }
        Ok(Flow::Continue)
    }

    fn write_table(&mut self, bills: &[Bill]) -> Result<()> {
        writeln!(self.output, "{}", ui::bill_table(bills, self.today, &self.theme))?;
        Ok(())
    }

    fn report_error(&mut self, error: &Error) -> Result<()> {
        let message = error.to_string();
        writeln!(self.output, "\n{} {}", Icons::CROSS, message.style(self.theme.error))?;
        Ok(())
    }

    /// Show a prompt and read one line; `None` at end of input
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{} ", label.style(self.theme.prompt))?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
