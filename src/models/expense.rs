//! Expense model
//!
//! An `ExpenseDraft` is a validated expense that has not been stored yet;
//! an `Expense` is the same record once the store has assigned it an id.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

use super::amount::Amount;
use super::ids::ExpenseId;

/// Date format used for input, storage and default display
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Render a date with a strftime pattern
///
/// Returns `None` for patterns a calendar date cannot satisfy, such as time
/// specifiers (`%H`) or unknown ones (`%Q`).
pub fn format_date(date: NaiveDate, pattern: &str) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", date.format(pattern)).ok()?;
    Some(out)
}

/// A validated expense without an id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseDraft {
    /// Amount spent (always positive)
    pub amount: Amount,

    /// Calendar date of the expense
    pub date: NaiveDate,

    /// Trimmed, non-empty description
    pub description: String,
}

impl ExpenseDraft {
    pub fn new(amount: Amount, date: NaiveDate, description: impl Into<String>) -> Self {
        Self {
            amount,
            date,
            description: description.into(),
        }
    }
}

/// A stored expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Identifier assigned by the store
    pub id: ExpenseId,

    /// Amount spent (always positive)
    pub amount: Amount,

    /// Calendar date of the expense
    pub date: NaiveDate,

    /// Trimmed, non-empty description
    pub description: String,
}

impl Expense {
    /// Attach a store-assigned id to a draft
    pub fn from_draft(id: ExpenseId, draft: ExpenseDraft) -> Self {
        Self {
            id,
            amount: draft.amount,
            date: draft.date,
            description: draft.description,
        }
    }

    /// The id-less part of this expense
    pub fn draft(&self) -> ExpenseDraft {
        ExpenseDraft {
            amount: self.amount,
            date: self.date,
            description: self.description.clone(),
        }
    }

    /// Replace all editable fields with those of a validated draft
    pub fn apply(&mut self, draft: ExpenseDraft) {
        self.amount = draft.amount;
        self.date = draft.date;
        self.description = draft.description;
    }

    /// The instant this expense is placed at on the timeline
    ///
    /// Dates carry no time of day, so an expense sits at midnight UTC of its
    /// calendar day.
    pub fn instant(&self) -> DateTime<Utc> {
        self.date.and_time(NaiveTime::MIN).and_utc()
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format(DATE_FORMAT),
            self.description,
            self.amount
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_draft() -> ExpenseDraft {
        ExpenseDraft::new(
            Amount::new(59.99),
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            "A pair of shoes",
        )
    }

    #[test]
    fn test_from_draft_and_back() {
        let draft = sample_draft();
        let expense = Expense::from_draft(ExpenseId::new("e1"), draft.clone());

        assert_eq!(expense.id.as_str(), "e1");
        assert_eq!(expense.draft(), draft);
    }

    #[test]
    fn test_apply_keeps_id() {
        let mut expense = Expense::from_draft(ExpenseId::new("e1"), sample_draft());
        let replacement = ExpenseDraft::new(
            Amount::new(5.0),
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            "Coffee",
        );

        expense.apply(replacement.clone());

        assert_eq!(expense.id.as_str(), "e1");
        assert_eq!(expense.draft(), replacement);
    }

    #[test]
    fn test_instant_is_midnight_utc() {
        let expense = Expense::from_draft(ExpenseId::new("e1"), sample_draft());
        assert_eq!(
            expense.instant(),
            Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_serialization() {
        let expense = Expense::from_draft(ExpenseId::new("e1"), sample_draft());
        let json = serde_json::to_value(&expense).unwrap();

        assert_eq!(json["id"], "e1");
        assert_eq!(json["date"], "2024-03-04");
        assert_eq!(json["amount"], 59.99);

        let deserialized: Expense = serde_json::from_value(json).unwrap();
        assert_eq!(expense, deserialized);
    }

    #[test]
    fn test_display() {
        let expense = Expense::from_draft(ExpenseId::new("e1"), sample_draft());
        assert_eq!(expense.to_string(), "2024-03-04 A pair of shoes $59.99");
    }

    #[test]
    fn test_format_date_rejects_time_patterns() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();

        assert_eq!(format_date(date, "%d.%m.%Y").as_deref(), Some("04.03.2024"));
        assert_eq!(format_date(date, "%H:%M"), None);
        assert_eq!(format_date(date, "%Q"), None);
    }
}
