//! Storage layer for the expense tracker
//!
//! `Storage` bundles the expense store (system of record), the in-memory
//! collection of known expenses and the audit log, and is handed to the
//! service layer explicitly.

pub mod collection;
pub mod file_io;
pub mod json_store;
pub mod memory;
pub mod store;

pub use collection::ExpenseCollection;
pub use file_io::{read_json, write_json_atomic};
pub use json_store::JsonFileStore;
pub use memory::MemoryStore;
pub use store::ExpenseStore;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::paths::ExpensePaths;
use crate::error::ExpenseError;

/// Main storage coordinator
pub struct Storage {
    pub store: Box<dyn ExpenseStore>,
    pub expenses: ExpenseCollection,
    audit: AuditLogger,
}

impl Storage {
    /// Storage backed by the JSON file store under `paths`
    pub fn new(paths: ExpensePaths) -> Result<Self, ExpenseError> {
        let store = JsonFileStore::new(paths.expenses_file());
        Self::with_store(paths, Box::new(store))
    }

    /// Storage backed by an arbitrary store
    pub fn with_store(
        paths: ExpensePaths,
        store: Box<dyn ExpenseStore>,
    ) -> Result<Self, ExpenseError> {
        paths.ensure_directories()?;

        Ok(Self {
            audit: AuditLogger::new(paths.audit_log()),
            store,
            expenses: ExpenseCollection::new(),
        })
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Record a create in the audit log
    pub fn log_create<T: Serialize>(
        &self,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), ExpenseError> {
        self.audit
            .log(&AuditEntry::create(entity_id, entity_name, entity))
    }

    /// Record an update in the audit log
    pub fn log_update<T: Serialize>(
        &self,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> Result<(), ExpenseError> {
        self.audit.log(&AuditEntry::update(
            entity_id,
            entity_name,
            before,
            after,
            diff_summary,
        ))
    }

    /// Record a delete in the audit log
    pub fn log_delete<T: Serialize>(
        &self,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), ExpenseError> {
        self.audit
            .log(&AuditEntry::delete(entity_id, entity_name, entity))
    }
}
