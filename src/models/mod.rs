//! Core data models for the expense tracker
//!
//! Validated expenses, their identifiers and amounts.

pub mod amount;
pub mod expense;
pub mod ids;

pub use amount::{Amount, AmountParseError};
pub use expense::{Expense, ExpenseDraft};
pub use ids::ExpenseId;
