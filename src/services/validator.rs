//! Expense input validation
//!
//! Turns the three raw strings a user typed into a validated `ExpenseDraft`,
//! or reports which of the fields are wrong. Invalid input is an ordinary
//! result, never a panic.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::expense::DATE_FORMAT;
use crate::models::{Amount, ExpenseDraft};

/// Raw, unvalidated expense fields as entered by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseInput {
    pub amount_text: String,
    pub date_text: String,
    pub description_text: String,
}

impl ExpenseInput {
    pub fn new(
        amount_text: impl Into<String>,
        date_text: impl Into<String>,
        description_text: impl Into<String>,
    ) -> Self {
        Self {
            amount_text: amount_text.into(),
            date_text: date_text.into(),
            description_text: description_text.into(),
        }
    }
}

/// Per-field validity report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors {
    pub amount_valid: bool,
    pub date_valid: bool,
    pub description_valid: bool,
}

impl FieldErrors {
    /// Names of the fields that failed, in form order
    pub fn invalid_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if !self.amount_valid {
            fields.push("amount");
        }
        if !self.date_valid {
            fields.push("date");
        }
        if !self.description_valid {
            fields.push("description");
        }
        fields
    }
}

/// Validate raw input into a normalized draft
pub fn validate(input: &ExpenseInput) -> Result<ExpenseDraft, FieldErrors> {
    let amount = Amount::parse(&input.amount_text).ok();
    let date = parse_date(&input.date_text);
    let description = input.description_text.trim();

    match (amount, date, description.is_empty()) {
        (Some(amount), Some(date), false) => Ok(ExpenseDraft::new(amount, date, description)),
        (amount, date, description_empty) => Err(FieldErrors {
            amount_valid: amount.is_some(),
            date_valid: date.is_some(),
            description_valid: !description_empty,
        }),
    }
}

/// Parse a `yyyy-mm-dd` date
///
/// chrono alone accepts unpadded months/days and signed years, so the shape is
/// checked first: four digits, dash, two digits, dash, two digits.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    let bytes = text.as_bytes();

    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return None;
    }

    NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
}
