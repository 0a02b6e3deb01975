//! Expense CLI commands

use chrono::{DateTime, Utc};
use clap::Subcommand;

use crate::config::Settings;
use crate::display::expense::{
    format_expense_details, format_expense_list, format_field_errors,
};
use crate::error::{ExpenseError, ExpenseResult};
use crate::form::{ExpenseField, ExpenseForm};
use crate::models::Expense;
use crate::services::validator::ExpenseInput;
use crate::services::ExpenseService;
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Add a new expense
    Add {
        /// Amount spent (e.g. "12.50")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Date of the expense (YYYY-MM-DD)
        date: String,
        /// What the money was spent on
        description: String,
    },
    /// Edit an existing expense
    Edit {
        /// Expense ID (or a unique prefix)
        id: String,
        /// New amount
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete an expense
    Delete {
        /// Expense ID (or a unique prefix)
        id: String,
    },
    /// Show expense details
    Show {
        /// Expense ID (or a unique prefix)
        id: String,
    },
    /// List all expenses
    List,
    /// List expenses of the recent window
    Recent {
        /// Window length in days (defaults to the configured window)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        days: Option<u32>,
    },
    /// Show the most recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

/// Handle an expense command
///
/// Except for `history`, the collection is refreshed from the store first so
/// ids typed by the user resolve against the current data.
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
    now: DateTime<Utc>,
) -> ExpenseResult<()> {
    let service = ExpenseService::new(storage);
    let symbol = settings.currency_symbol.as_str();
    let date_format = settings.date_format.as_str();

    if !matches!(cmd, ExpenseCommands::History { .. }) {
        service.fetch()?;
    }

    match cmd {
        ExpenseCommands::Add {
            amount,
            date,
            description,
        } => {
            let input = ExpenseInput::new(amount, date, description);
            let expense = service.create(&input).map_err(|e| report_invalid(&input, e))?;
            println!("Added expense {}", expense.id.short());
            print!("{}", format_expense_details(&expense, symbol, date_format));
        }

        ExpenseCommands::Edit {
            id,
            amount,
            date,
            description,
        } => {
            let expense = resolve(&service, &id)?;
            let mut form = ExpenseForm::from_expense(&expense);

            let changes = [
                (ExpenseField::Amount, amount),
                (ExpenseField::Date, date),
                (ExpenseField::Description, description),
            ];
            let mut changed = false;
            for (field, value) in changes {
                if let Some(value) = value {
                    form.set_value(field, value);
                    changed = true;
                }
            }

            if !changed {
                println!("Nothing to change. Use --amount, --date or --description.");
                return Ok(());
            }

            let input = form.input();
            let updated = service
                .update(&expense.id, &input)
                .map_err(|e| report_invalid(&input, e))?;
            println!("Updated expense {}", updated.id.short());
            print!("{}", format_expense_details(&updated, symbol, date_format));
        }

        ExpenseCommands::Delete { id } => {
            let expense = resolve(&service, &id)?;
            let deleted = service.delete(&expense.id)?;
            println!(
                "Deleted expense {} ({})",
                deleted.id.short(),
                deleted.description
            );
        }

        ExpenseCommands::Show { id } => {
            let expense = resolve(&service, &id)?;
            print!("{}", format_expense_details(&expense, symbol, date_format));
        }

        ExpenseCommands::List => {
            let expenses = service.list()?;
            print!(
                "{}",
                format_expense_list(&expenses, "Total", "No expenses found!", symbol, date_format)
            );
        }

        ExpenseCommands::Recent { days } => {
            let days = days.unwrap_or(settings.recent_window_days);
            let expenses = service.recent(now, days)?;
            print!(
                "{}",
                format_expense_list(
                    &expenses,
                    &format!("Last {} Days", days),
                    &format!("No expenses registered for the last {} days.", days),
                    symbol,
                    date_format,
                )
            );
        }

        ExpenseCommands::History { limit } => {
            let entries = storage.audit().read_recent(limit)?;
            if entries.is_empty() {
                println!("No changes recorded yet.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
    }

    Ok(())
}

fn resolve(service: &ExpenseService<'_>, identifier: &str) -> ExpenseResult<Expense> {
    service
        .find(identifier)?
        .ok_or_else(|| ExpenseError::expense_not_found(identifier))
}

/// Print per-field feedback before handing a validation error back
fn report_invalid(input: &ExpenseInput, err: ExpenseError) -> ExpenseError {
    if let ExpenseError::InvalidInput(errors) = &err {
        eprint!("{}", format_field_errors(input, errors));
    }
    err
}
