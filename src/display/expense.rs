//! Expense display formatting
//!
//! Renders expense lists with a period/total summary line, single expense
//! details and per-field validation feedback.

use chrono::NaiveDate;

use crate::form::ExpenseField;
use crate::models::expense::{format_date, DATE_FORMAT};
use crate::models::Expense;
use crate::services::validator::{ExpenseInput, FieldErrors};
use crate::services::ExpenseService;

/// Column width for the description
const DESCRIPTION_WIDTH: usize = 30;

/// Format a single expense as a list row
pub fn format_expense_row(expense: &Expense, symbol: &str, date_format: &str) -> String {
    format!(
        "{:8}  {:10}  {:30}  {:>12}",
        expense.id.short(),
        display_date(expense.date, date_format),
        truncate(&expense.description, DESCRIPTION_WIDTH),
        expense.amount.format_with_symbol(symbol)
    )
}

/// Format a list of expenses under a summary header
///
/// `fallback_text` is shown instead of the table when the list is empty.
pub fn format_expense_list(
    expenses: &[Expense],
    period_label: &str,
    fallback_text: &str,
    symbol: &str,
    date_format: &str,
) -> String {
    let mut output = String::new();

    let total = ExpenseService::total(expenses);
    output.push_str(&format!(
        "{}: {} ({} expense{})\n",
        period_label,
        total.format_with_symbol(symbol),
        expenses.len(),
        if expenses.len() == 1 { "" } else { "s" }
    ));

    if expenses.is_empty() {
        output.push_str(fallback_text);
        output.push('\n');
        return output;
    }

    output.push_str(&format!(
        "{:8}  {:10}  {:30}  {:>12}\n",
        "ID", "Date", "Description", "Amount"
    ));
    output.push_str(&"-".repeat(68));
    output.push('\n');

    for expense in expenses {
        output.push_str(&format_expense_row(expense, symbol, date_format));
        output.push('\n');
    }

    output
}

/// Format full details of one expense
pub fn format_expense_details(expense: &Expense, symbol: &str, date_format: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("Expense:     {}\n", expense.id));
    output.push_str(&format!(
        "Date:        {}\n",
        display_date(expense.date, date_format)
    ));
    output.push_str(&format!(
        "Amount:      {}\n",
        expense.amount.format_with_symbol(symbol)
    ));
    output.push_str(&format!("Description: {}\n", expense.description));
    output
}

/// Per-field feedback for a rejected form, echoing what the user typed
pub fn format_field_errors(input: &ExpenseInput, errors: &FieldErrors) -> String {
    let rows = [
        (ExpenseField::Amount, &input.amount_text, errors.amount_valid),
        (ExpenseField::Date, &input.date_text, errors.date_valid),
        (
            ExpenseField::Description,
            &input.description_text,
            errors.description_valid,
        ),
    ];

    let mut output = String::from("Invalid input values - please check your entered data!\n");
    for (field, value, valid) in rows {
        let marker = if valid { "ok" } else { "invalid" };
        output.push_str(&format!(
            "  {:12} {:8} '{}'\n",
            format!("{}:", field.label()),
            marker,
            value
        ));
    }
    output
}

/// Falls back to `yyyy-mm-dd` when the configured pattern cannot render a date
fn display_date(date: NaiveDate, date_format: &str) -> String {
    format_date(date, date_format).unwrap_or_else(|| date.format(DATE_FORMAT).to_string())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amount, ExpenseDraft, ExpenseId};

    fn expense(id: &str, amount: f64, description: &str) -> Expense {
        Expense::from_draft(
            ExpenseId::new(id),
            ExpenseDraft::new(
                Amount::new(amount),
                NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
                description,
            ),
        )
    }

    #[test]
    fn test_unusable_date_format_falls_back() {
        let row = format_expense_row(&expense("abcdef123456", 12.5, "Books"), "$", "%H:%M");
        assert!(row.contains("2024-03-04"));

        let details = format_expense_details(&expense("abc", 1.0, "Tea"), "$", "%Q");
        assert!(details.contains("Date:        2024-03-04"));
    }

    #[test]
    fn test_row_contains_fields() {
        let row = format_expense_row(&expense("abcdef123456", 12.5, "Books"), "$", "%Y-%m-%d");
        assert!(row.starts_with("abcdef12"));
        assert!(row.contains("2024-03-04"));
        assert!(row.contains("Books"));
        assert!(row.ends_with("$12.50"));
    }

    #[test]
    fn test_list_with_total() {
        let expenses = vec![expense("a", 12.5, "Books"), expense("b", 7.5, "Lunch")];
        let output = format_expense_list(&expenses, "Last 7 Days", "none", "$", "%Y-%m-%d");

        assert!(output.starts_with("Last 7 Days: $20.00 (2 expenses)"));
        assert!(output.contains("Books"));
        assert!(output.contains("Lunch"));
        assert!(!output.contains("none"));
    }

    #[test]
    fn test_empty_list_uses_fallback() {
        let output = format_expense_list(
            &[],
            "Last 7 Days",
            "No expenses registered for the last 7 days.",
            "$",
            "%Y-%m-%d",
        );
        assert!(output.contains("$0.00 (0 expenses)"));
        assert!(output.contains("No expenses registered for the last 7 days."));
        assert!(!output.contains("Description"));
    }

    #[test]
    fn test_long_description_truncated() {
        let long = "x".repeat(50);
        let row = format_expense_row(&expense("a", 1.0, &long), "$", "%Y-%m-%d");
        assert!(row.contains(&format!("{}...", "x".repeat(27))));
    }

    #[test]
    fn test_details() {
        let details = format_expense_details(&expense("abc", 3.0, "Tea"), "€", "%d.%m.%Y");
        assert!(details.contains("Expense:     abc"));
        assert!(details.contains("04.03.2024"));
        assert!(details.contains("€3.00"));
    }

    #[test]
    fn test_field_errors_echo_input() {
        let input = ExpenseInput::new("abc", "2024-03-04", "");
        let errors = FieldErrors {
            amount_valid: false,
            date_valid: true,
            description_valid: false,
        };

        let output = format_field_errors(&input, &errors);
        assert!(output.contains("Amount:      invalid  'abc'"));
        assert!(output.contains("Date:        ok       '2024-03-04'"));
        assert!(output.contains("Description: invalid  ''"));
    }
}
