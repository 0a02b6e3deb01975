//! The expense store abstraction
//!
//! The store is the system of record for expenses: it assigns ids on create
//! and is the source `fetch` reloads from. Any call may fail with
//! `ExpenseError::Store`; callers surface that to the user and do not retry.

use crate::error::ExpenseResult;
use crate::models::{Expense, ExpenseDraft, ExpenseId};

/// List/create/update/delete over stored expenses
pub trait ExpenseStore {
    /// All stored expenses, in store order
    fn list(&self) -> ExpenseResult<Vec<Expense>>;

    /// Store a new expense and return the id assigned to it
    fn create(&self, draft: &ExpenseDraft) -> ExpenseResult<ExpenseId>;

    /// Replace the fields of an existing expense
    fn update(&self, id: &ExpenseId, draft: &ExpenseDraft) -> ExpenseResult<()>;

    /// Remove an expense
    fn delete(&self, id: &ExpenseId) -> ExpenseResult<()>;
}
