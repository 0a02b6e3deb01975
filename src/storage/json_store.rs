//! JSON file-backed expense store
//!
//! Keeps every expense in a single `expenses.json` document. Each call reads
//! the document, applies one change and writes it back atomically, so the
//! file is always the authoritative copy and the in-memory collection is only
//! a view of it.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, ExpenseDraft, ExpenseId};

use super::file_io::{read_json, write_json_atomic};
use super::store::ExpenseStore;

/// On-disk document layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ExpenseData {
    expenses: Vec<Expense>,
}

/// Expense store persisted as a JSON document
pub struct JsonFileStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process
    write_guard: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_guard: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> ExpenseResult<ExpenseData> {
        read_json(&self.path).map_err(into_store_error)
    }

    fn write(&self, data: &ExpenseData) -> ExpenseResult<()> {
        write_json_atomic(&self.path, data).map_err(into_store_error)
    }

    /// Run one read-modify-write cycle under the write guard
    fn modify<T>(&self, f: impl FnOnce(&mut ExpenseData) -> ExpenseResult<T>) -> ExpenseResult<T> {
        let _guard = self
            .write_guard
            .lock()
            .map_err(|e| ExpenseError::Store(format!("Failed to acquire store lock: {}", e)))?;

        let mut data = self.read()?;
        let result = f(&mut data)?;
        self.write(&data)?;
        Ok(result)
    }
}

fn into_store_error(err: ExpenseError) -> ExpenseError {
    match err {
        ExpenseError::Store(_) => err,
        other => ExpenseError::Store(other.to_string()),
    }
}

fn unknown_id(id: &ExpenseId) -> ExpenseError {
    ExpenseError::Store(format!("No stored expense with id {}", id))
}

impl ExpenseStore for JsonFileStore {
    fn list(&self) -> ExpenseResult<Vec<Expense>> {
        let data = self.read()?;
        debug!(count = data.expenses.len(), path = %self.path.display(), "listed expenses");
        Ok(data.expenses)
    }

    fn create(&self, draft: &ExpenseDraft) -> ExpenseResult<ExpenseId> {
        self.modify(|data| {
            let id = ExpenseId::generate();
            data.expenses
                .push(Expense::from_draft(id.clone(), draft.clone()));
            debug!(%id, "stored new expense");
            Ok(id)
        })
    }

    fn update(&self, id: &ExpenseId, draft: &ExpenseDraft) -> ExpenseResult<()> {
        self.modify(|data| {
            let expense = data
                .expenses
                .iter_mut()
                .find(|e| &e.id == id)
                .ok_or_else(|| unknown_id(id))?;
            expense.apply(draft.clone());
            debug!(%id, "updated stored expense");
            Ok(())
        })
    }

    fn delete(&self, id: &ExpenseId) -> ExpenseResult<()> {
        self.modify(|data| {
            let before = data.expenses.len();
            data.expenses.retain(|e| &e.id != id);
            if data.expenses.len() == before {
                return Err(unknown_id(id));
            }
            debug!(%id, "deleted stored expense");
            Ok(())
        })
    }
}
