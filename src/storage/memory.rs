//! In-memory expense store
//!
//! Behaves like the file store but keeps nothing on disk. The `offline`
//! switch makes every call fail the way an unreachable backend would.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, ExpenseDraft, ExpenseId};

use super::store::ExpenseStore;

#[derive(Default)]
pub struct MemoryStore {
    expenses: RwLock<Vec<Expense>>,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail (or succeed again)
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> ExpenseResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(ExpenseError::Store("store is unreachable".into()));
        }
        Ok(())
    }
}

fn lock_error(e: impl std::fmt::Display) -> ExpenseError {
    ExpenseError::Store(format!("Failed to acquire store lock: {}", e))
}

impl ExpenseStore for MemoryStore {
    fn list(&self) -> ExpenseResult<Vec<Expense>> {
        self.check_online()?;
        let expenses = self.expenses.read().map_err(lock_error)?;
        Ok(expenses.clone())
    }

    fn create(&self, draft: &ExpenseDraft) -> ExpenseResult<ExpenseId> {
        self.check_online()?;
        let mut expenses = self.expenses.write().map_err(lock_error)?;
        let id = ExpenseId::generate();
        expenses.push(Expense::from_draft(id.clone(), draft.clone()));
        Ok(id)
    }

    fn update(&self, id: &ExpenseId, draft: &ExpenseDraft) -> ExpenseResult<()> {
        self.check_online()?;
        let mut expenses = self.expenses.write().map_err(lock_error)?;
        let expense = expenses
            .iter_mut()
            .find(|e| &e.id == id)
            .ok_or_else(|| ExpenseError::Store(format!("No stored expense with id {}", id)))?;
        expense.apply(draft.clone());
        Ok(())
    }

    fn delete(&self, id: &ExpenseId) -> ExpenseResult<()> {
        self.check_online()?;
        let mut expenses = self.expenses.write().map_err(lock_error)?;
        let before = expenses.len();
        expenses.retain(|e| &e.id != id);
        if expenses.len() == before {
            return Err(ExpenseError::Store(format!("No stored expense with id {}", id)));
        }
        Ok(())
    }
}
