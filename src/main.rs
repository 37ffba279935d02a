//! Billtrack CLI - interactive menu and one-shot commands for the bill store

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use billtrack::bill::{self, parse_amount};
use billtrack::config::{self, BilltrackConfig, PolicyOverrides};
use billtrack::menu::Session;
use billtrack::ui;
use billtrack::{BillStore, IdPolicy, PolicyPreset, StorePolicy};
use chrono::{Local, NaiveDate};
use std::path::Path;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "billtrack")]
#[command(version)]
#[command(about = "Personal bill tracker - record bills, track what is paid, see what is owed")]
#[command(long_about = r#"
Billtrack keeps your bills in a local SQLite file.

Run without a command for the interactive menu, or use one-shot commands:
  billtrack add --company "Power Co" --amount 82.15 --due 2030-01-20
  billtrack unpaid --window 30
  billtrack pay 3
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the database file
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Accept any due date text without validation
    #[arg(long, global = true)]
    lenient: bool,

    /// Start from a named policy: default, legacy-lenient or legacy-strict
    #[arg(long, global = true)]
    preset: Option<PolicyPreset>,

    /// What happens to later ids when a bill is removed: stable (default,
    /// ids never change) or renumber (legacy opt-in: later ids shift down by one)
    #[arg(long, global = true)]
    id_policy: Option<IdPolicy>,

    /// Default window, in days, for the unpaid listing
    #[arg(long, global = true)]
    unpaid_window: Option<u32>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive numbered menu (default)
    Menu,

    /// Add a bill
    Add {
        #[arg(long)]
        company: String,

        #[arg(long, value_parser = parse_amount, allow_hyphen_values = true)]
        amount: f64,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: String,
    },

    /// List every bill, unpaid first
    List {
        #[arg(long)]
        json: bool,
    },

    /// List unpaid bills and the total owed
    Unpaid {
        /// Only show bills due within this many days
        #[arg(short, long)]
        window: Option<u32>,

        /// Ignore any configured window
        #[arg(long, conflicts_with = "window")]
        all: bool,

        #[arg(long)]
        json: bool,
    },

    /// Mark a bill as paid
    Pay { id: i64 },

    /// Mark a bill as unpaid
    Unpay { id: i64 },

    /// Remove a bill
    Remove { id: i64 },

    /// Change a bill's due date (reopens the bill)
    Due { id: i64, date: String },

    /// Change a bill's company name
    Rename { id: i64, name: String },

    /// Change a bill's amount
    Amount {
        id: i64,
        #[arg(value_parser = parse_amount, allow_hyphen_values = true)]
        amount: f64,
    },

    /// Print the total amount owed
    Total,

    /// Write a config file with the current settings
    InitConfig {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let settings = config::load_config(cli.config.as_deref())?.unwrap_or_default();
    let policy = settings.effective_policy(&PolicyOverrides {
        preset: cli.preset,
        lenient: cli.lenient,
        id_policy: cli.id_policy,
        unpaid_window_days: cli.unpaid_window,
    });
    let database = cli.database.clone().unwrap_or_else(|| settings.database_path());
    let today = Local::now().date_naive();

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::InitConfig { force } => {
            let path = cli.config.unwrap_or_else(config::default_config_path);
            let to_write = BilltrackConfig {
                database: Some(database.to_string_lossy().to_string()),
                preset: None,
                policy: Some(policy),
            };
            config::write_config(&path, &to_write, force)?;
            ui::success(&format!("Wrote config to {}", path.display()));
        }

        Commands::Menu => with_store(&database, policy, |store| {
            ui::header("Bill Tracker");
            ui::info("Database", &database.display().to_string());
            let stdin = std::io::stdin();
            let mut session = Session::new(store, stdin.lock(), std::io::stdout());
            session.run()?;
            Ok(())
        })?,

        Commands::Add { company, amount, due } => with_store(&database, policy, |store| {
            let id = store.create(&company, amount, &due)?;
            ui::success(&format!("Bill {} added.", id));
            Ok(())
        })?,

        Commands::List { json } => with_store(&database, policy, |store| {
            let mut bills = store.list_all()?;
            bill::sort_for_display(&mut bills);
            let total = store.total_owed()?;
            if json {
                print_json(serde_json::json!({
                    "bills": ui::bill_entries(&bills, today),
                    "total_owed": total,
                }))
            } else {
                print_bills(&bills, total, today);
                Ok(())
            }
        })?,

        Commands::Unpaid { window, all, json } => with_store(&database, policy, |store| {
            let window = if all { None } else { window.or(store.policy().unpaid_window_days) };
            let mut unpaid = store.list_unpaid_as_of(window, today)?;
            bill::sort_for_display(&mut unpaid.bills);
            if json {
                print_json(serde_json::json!({
                    "window_days": window,
                    "bills": ui::bill_entries(&unpaid.bills, today),
                    "total_owed": unpaid.total_owed,
                }))
            } else {
                if let Some(days) = window {
                    ui::info("Window", &format!("due within {} days", days));
                }
                print_bills(&unpaid.bills, unpaid.total_owed, today);
                Ok(())
            }
        })?,

        Commands::Pay { id } => with_store(&database, policy, |store| {
            report(id, store.mark_paid(id)?, "marked as paid");
            Ok(())
        })?,

        Commands::Unpay { id } => with_store(&database, policy, |store| {
            report(id, store.mark_unpaid(id)?, "marked as unpaid");
            Ok(())
        })?,

        Commands::Remove { id } => with_store(&database, policy, |store| {
            report(id, store.remove(id)?, "removed");
            Ok(())
        })?,

        Commands::Due { id, date } => with_store(&database, policy, |store| {
            report(id, store.update_due_date(id, &date)?, "due date changed");
            Ok(())
        })?,

        Commands::Rename { id, name } => with_store(&database, policy, |store| {
            report(id, store.update_company(id, &name)?, "company name changed");
            Ok(())
        })?,

        Commands::Amount { id, amount } => with_store(&database, policy, |store| {
            report(id, store.update_amount(id, amount)?, "balance changed");
            Ok(())
        })?,

        Commands::Total => with_store(&database, policy, |store| {
            println!("{}", ui::total_line(store.total_owed()?, ui::theme()));
            Ok(())
        })?,
    }

    Ok(())
}

/// Open the store, run one command against it, then close it.
fn with_store<F>(database: &Path, policy: StorePolicy, run: F) -> anyhow::Result<()>
where
    F: FnOnce(&BillStore) -> anyhow::Result<()>,
{
    config::ensure_db_dir(database)?;
    let store = BillStore::open(database, policy)?;
    run(&store)?;
    store.close()?;
    Ok(())
}

fn print_bills(bills: &[billtrack::Bill], total: f64, today: NaiveDate) {
    println!("{}", ui::bill_table(bills, today, ui::theme()));
    println!("{}", ui::total_line(total, ui::theme()));
}

fn print_json(data: serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&data)?);
    Ok(())
}

/// Missing ids are not an error; say so and move on.
fn report(id: i64, changed: usize, what: &str) {
    if changed == 0 {
        ui::warn(&format!("No bill with id {}; nothing changed.", id));
    } else {
        ui::success(&format!("Bill {} {}.", id, what));
    }
}
