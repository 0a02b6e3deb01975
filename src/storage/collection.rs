//! In-memory expense collection
//!
//! Owns the expenses the application currently knows about: whatever the
//! last fetch returned plus local creates/updates/deletes. Order is display
//! order; newly added expenses go first.

use std::sync::RwLock;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, ExpenseDraft, ExpenseId};

#[derive(Debug, Default)]
pub struct ExpenseCollection {
    expenses: RwLock<Vec<Expense>>,
}

fn read_lock_error(e: impl std::fmt::Display) -> ExpenseError {
    ExpenseError::Storage(format!("Failed to acquire read lock: {}", e))
}

fn write_lock_error(e: impl std::fmt::Display) -> ExpenseError {
    ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
}

impl ExpenseCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a stored expense at the front
    ///
    /// An expense whose id is already present replaces the old entry.
    pub fn add(&self, expense: Expense) -> ExpenseResult<()> {
        let mut expenses = self.expenses.write().map_err(write_lock_error)?;
        expenses.retain(|e| e.id != expense.id);
        expenses.insert(0, expense);
        Ok(())
    }

    /// Replace the fields of an expense in place; false if the id is unknown
    pub fn update(&self, id: &ExpenseId, draft: ExpenseDraft) -> ExpenseResult<bool> {
        let mut expenses = self.expenses.write().map_err(write_lock_error)?;
        match expenses.iter_mut().find(|e| &e.id == id) {
            Some(expense) => {
                expense.apply(draft);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove an expense; false if the id is unknown
    pub fn delete(&self, id: &ExpenseId) -> ExpenseResult<bool> {
        let mut expenses = self.expenses.write().map_err(write_lock_error)?;
        let before = expenses.len();
        expenses.retain(|e| &e.id != id);
        Ok(expenses.len() != before)
    }

    /// Replace the whole collection with a freshly fetched list
    pub fn replace_all(&self, replacement: Vec<Expense>) -> ExpenseResult<()> {
        let mut expenses = self.expenses.write().map_err(write_lock_error)?;
        *expenses = replacement;
        Ok(())
    }

    pub fn get(&self, id: &ExpenseId) -> ExpenseResult<Option<Expense>> {
        let expenses = self.expenses.read().map_err(read_lock_error)?;
        Ok(expenses.iter().find(|e| &e.id == id).cloned())
    }

    /// All expenses in display order
    pub fn all(&self) -> ExpenseResult<Vec<Expense>> {
        let expenses = self.expenses.read().map_err(read_lock_error)?;
        Ok(expenses.clone())
    }

    pub fn len(&self) -> ExpenseResult<usize> {
        let expenses = self.expenses.read().map_err(read_lock_error)?;
        Ok(expenses.len())
    }

    pub fn is_empty(&self) -> ExpenseResult<bool> {
        Ok(self.len()? == 0)
    }
}
