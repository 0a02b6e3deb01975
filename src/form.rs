//! Expense form state
//!
//! Holds what the user has typed into the three expense fields together with
//! a validity flag per field, so a front end can highlight exactly the fields
//! that failed and redisplay the user's text unchanged.

use crate::models::expense::DATE_FORMAT;
use crate::models::{Expense, ExpenseDraft};
use crate::services::validator::{validate, ExpenseInput, FieldErrors};

/// The fields of the expense form, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpenseField {
    #[default]
    Amount,
    Date,
    Description,
}

impl ExpenseField {
    /// Label shown next to the input
    pub fn label(self) -> &'static str {
        match self {
            Self::Amount => "Amount",
            Self::Date => "Date",
            Self::Description => "Description",
        }
    }
}

/// One form input: raw text plus whether it passed the last submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub value: String,
    pub is_valid: bool,
}

impl FormField {
    fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            is_valid: true,
        }
    }
}

impl Default for FormField {
    fn default() -> Self {
        Self::with_value(String::new())
    }
}

/// State of the add/edit expense form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseForm {
    pub amount: FormField,
    pub date: FormField,
    pub description: FormField,
    /// Whether the form edits an existing expense
    pub is_edit: bool,
}

impl ExpenseForm {
    /// Create an empty form for a new expense
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a form pre-populated from an existing expense
    pub fn from_expense(expense: &Expense) -> Self {
        Self {
            amount: FormField::with_value(expense.amount.to_input_text()),
            date: FormField::with_value(expense.date.format(DATE_FORMAT).to_string()),
            description: FormField::with_value(expense.description.clone()),
            is_edit: true,
        }
    }

    /// Borrow a field
    pub fn field(&self, field: ExpenseField) -> &FormField {
        match field {
            ExpenseField::Amount => &self.amount,
            ExpenseField::Date => &self.date,
            ExpenseField::Description => &self.description,
        }
    }

    fn field_mut(&mut self, field: ExpenseField) -> &mut FormField {
        match field {
            ExpenseField::Amount => &mut self.amount,
            ExpenseField::Date => &mut self.date,
            ExpenseField::Description => &mut self.description,
        }
    }

    /// Replace a field's text; editing a field clears its error
    pub fn set_value(&mut self, field: ExpenseField, value: impl Into<String>) {
        *self.field_mut(field) = FormField::with_value(value);
    }

    /// The raw texts currently in the form
    pub fn input(&self) -> ExpenseInput {
        ExpenseInput::new(
            self.amount.value.clone(),
            self.date.value.clone(),
            self.description.value.clone(),
        )
    }

    /// Validate the form
    ///
    /// On failure every field's flag is updated and the texts are left alone.
    pub fn submit(&mut self) -> Result<ExpenseDraft, FieldErrors> {
        let result = validate(&self.input());
        if let Err(errors) = &result {
            self.amount.is_valid = errors.amount_valid;
            self.date.is_valid = errors.date_valid;
            self.description.is_valid = errors.description_valid;
        }
        result
    }

    /// Whether any field is currently flagged invalid
    pub fn is_invalid(&self) -> bool {
        !self.amount.is_valid || !self.date.is_valid || !self.description.is_valid
    }
}
