//! Expense service
//!
//! Sequences each user action: validate the input, make exactly one store
//! call, then mirror the outcome into the in-memory collection and the audit
//! log. A failed store call leaves the collection as it was.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::error::{ExpenseError, ExpenseResult};
use crate::form::ExpenseForm;
use crate::models::{Amount, Expense, ExpenseDraft, ExpenseId};
use crate::storage::Storage;

use super::recent::select_recent;
use super::validator::{validate, ExpenseInput};

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Reload every expense from the store into the collection
    pub fn fetch(&self) -> ExpenseResult<Vec<Expense>> {
        let expenses = self.storage.store.list().map_err(|e| {
            warn!(error = %e, "failed to fetch expenses");
            e
        })?;

        self.storage.expenses.replace_all(expenses.clone())?;
        info!(count = expenses.len(), "fetched expenses");
        Ok(expenses)
    }

    /// Validate and store a new expense
    pub fn create(&self, input: &ExpenseInput) -> ExpenseResult<Expense> {
        let draft = validate(input).map_err(ExpenseError::InvalidInput)?;

        let id = self.storage.store.create(&draft).map_err(|e| {
            warn!(error = %e, "failed to store new expense");
            e
        })?;
        let expense = Expense::from_draft(id, draft);

        self.storage.expenses.add(expense.clone())?;

        record_audit(self.storage.log_create(
            expense.id.to_string(),
            Some(expense.description.clone()),
            &expense,
        ));

        info!(id = %expense.id, "created expense");
        Ok(expense)
    }

    /// Validate replacement fields and update an existing expense
    pub fn update(&self, id: &ExpenseId, input: &ExpenseInput) -> ExpenseResult<Expense> {
        let before = self.require(id)?;
        let draft = validate(input).map_err(ExpenseError::InvalidInput)?;

        self.storage.store.update(id, &draft).map_err(|e| {
            warn!(%id, error = %e, "failed to update expense");
            e
        })?;

        let mut after = before.clone();
        after.apply(draft.clone());
        self.storage.expenses.update(id, draft)?;

        record_audit(self.storage.log_update(
            id.to_string(),
            Some(after.description.clone()),
            &before,
            &after,
            change_summary(&before, &after),
        ));

        info!(%id, "updated expense");
        Ok(after)
    }

    /// Delete an expense
    pub fn delete(&self, id: &ExpenseId) -> ExpenseResult<Expense> {
        let expense = self.require(id)?;

        self.storage.store.delete(id).map_err(|e| {
            warn!(%id, error = %e, "failed to delete expense");
            e
        })?;

        self.storage.expenses.delete(id)?;

        record_audit(self.storage.log_delete(
            id.to_string(),
            Some(expense.description.clone()),
            &expense,
        ));

        info!(%id, "deleted expense");
        Ok(expense)
    }

    pub fn get(&self, id: &ExpenseId) -> ExpenseResult<Option<Expense>> {
        self.storage.expenses.get(id)
    }

    /// Find an expense by full id or by an unambiguous id prefix
    pub fn find(&self, identifier: &str) -> ExpenseResult<Option<Expense>> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Ok(None);
        }

        let all = self.storage.expenses.all()?;
        if let Some(exact) = all.iter().find(|e| e.id.as_str() == identifier) {
            return Ok(Some(exact.clone()));
        }

        let mut matches = all
            .into_iter()
            .filter(|e| e.id.as_str().starts_with(identifier));
        match (matches.next(), matches.next()) {
            (Some(only), None) => Ok(Some(only)),
            _ => Ok(None),
        }
    }

    /// All known expenses in display order
    pub fn list(&self) -> ExpenseResult<Vec<Expense>> {
        self.storage.expenses.all()
    }

    /// Expenses of the trailing `window_days` window ending at `now`
    pub fn recent(&self, now: DateTime<Utc>, window_days: u32) -> ExpenseResult<Vec<Expense>> {
        let all = self.storage.expenses.all()?;
        Ok(select_recent(&all, now, window_days))
    }

    /// Form for adding (no id) or editing (existing id) an expense
    pub fn form_for(&self, id: Option<&ExpenseId>) -> ExpenseResult<ExpenseForm> {
        match id {
            Some(id) => Ok(ExpenseForm::from_expense(&self.require(id)?)),
            None => Ok(ExpenseForm::new()),
        }
    }

    /// Sum of the amounts of the given expenses
    pub fn total(expenses: &[Expense]) -> Amount {
        expenses.iter().map(|e| e.amount).sum()
    }

    fn require(&self, id: &ExpenseId) -> ExpenseResult<Expense> {
        self.storage
            .expenses
            .get(id)?
            .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))
    }
}

/// The store call already succeeded, so a failed audit append must not turn
/// the action into an error the user would retry.
fn record_audit(result: ExpenseResult<()>) {
    if let Err(e) = result {
        warn!(error = %e, "failed to append to audit log");
    }
}

/// Human-readable summary of the fields that changed
fn change_summary(before: &Expense, after: &Expense) -> Option<String> {
    let before: ExpenseDraft = before.draft();
    let after: ExpenseDraft = after.draft();

    let mut changes = Vec::new();
    if before.amount != after.amount {
        changes.push(format!("amount: {} -> {}", before.amount, after.amount));
    }
    if before.date != after.date {
        changes.push(format!("date: {} -> {}", before.date, after.date));
    }
    if before.description != after.description {
        changes.push(format!(
            "description: '{}' -> '{}'",
            before.description, after.description
        ));
    }

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::paths::ExpensePaths;
    use crate::form::ExpenseField;
    use crate::storage::{ExpenseStore, MemoryStore};
    use chrono::{NaiveDate, TimeZone};
    use std::sync::Arc;
    use tempfile::TempDir;

    /// Lets a test keep a handle on the store it gave to `Storage`
    struct SharedStore(Arc<MemoryStore>);

    impl ExpenseStore for SharedStore {
        fn list(&self) -> ExpenseResult<Vec<Expense>> {
            self.0.list()
        }
        fn create(&self, draft: &ExpenseDraft) -> ExpenseResult<ExpenseId> {
            self.0.create(draft)
        }
        fn update(&self, id: &ExpenseId, draft: &ExpenseDraft) -> ExpenseResult<()> {
            self.0.update(id, draft)
        }
        fn delete(&self, id: &ExpenseId) -> ExpenseResult<()> {
            self.0.delete(id)
        }
    }

    fn create_test_storage() -> (TempDir, Arc<MemoryStore>, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let store = Arc::new(MemoryStore::new());
        let storage = Storage::with_store(paths, Box::new(SharedStore(store.clone()))).unwrap();
        (temp_dir, store, storage)
    }

    fn input(amount: &str, date: &str, description: &str) -> ExpenseInput {
        ExpenseInput::new(amount, date, description)
    }

    #[test]
    fn test_create_expense() {
        let (_temp_dir, store, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let expense = service
            .create(&input("59.99", "2024-03-04", " A pair of shoes "))
            .unwrap();

        assert_eq!(expense.amount.value(), 59.99);
        assert_eq!(expense.description, "A pair of shoes");
        assert_eq!(store.list().unwrap(), vec![expense.clone()]);
        assert_eq!(service.list().unwrap(), vec![expense.clone()]);

        let audit = storage.audit().read_all().unwrap();
        assert_eq!(audit.len(), 1);
        assert_eq!(audit[0].operation, Operation::Create);
        assert_eq!(audit[0].entity_id, expense.id.to_string());
    }

    #[test]
    fn test_invalid_input_never_reaches_store() {
        let (_temp_dir, store, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let err = service.create(&input("0", "2024-02-30", "")).unwrap_err();
        match err {
            ExpenseError::InvalidInput(errors) => {
                assert_eq!(errors.invalid_fields(), vec!["amount", "date", "description"]);
            }
            other => panic!("expected InvalidInput, got {:?}", other),
        }

        assert!(store.list().unwrap().is_empty());
        assert!(service.list().unwrap().is_empty());
        assert_eq!(storage.audit().entry_count().unwrap(), 0);
    }

    #[test]
    fn test_fetch_replaces_collection() {
        let (_temp_dir, store, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let draft = validate(&input("10", "2024-03-01", "Stored elsewhere")).unwrap();
        store.create(&draft).unwrap();
        assert!(service.list().unwrap().is_empty());

        let fetched = service.fetch().unwrap();
        assert_eq!(fetched.len(), 1);
        assert_eq!(service.list().unwrap(), fetched);
    }

    #[test]
    fn test_update_expense() {
        let (_temp_dir, store, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let created = service.create(&input("5", "2024-03-04", "Coffee")).unwrap();

        let updated = service
            .update(&created.id, &input("6.5", "2024-03-05", "Coffee and cake"))
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.amount.value(), 6.5);
        assert_eq!(store.list().unwrap()[0], updated);
        assert_eq!(service.get(&created.id).unwrap().unwrap(), updated);

        let audit = storage.audit().read_all().unwrap();
        assert_eq!(audit[1].operation, Operation::Update);
        let summary = audit[1].diff_summary.as_deref().unwrap();
        assert!(summary.contains("amount: $5.00 -> $6.50"));
        assert!(summary.contains("description: 'Coffee' -> 'Coffee and cake'"));
    }

    #[test]
    fn test_update_rejects_invalid_and_unknown() {
        let (_temp_dir, _store, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let created = service.create(&input("5", "2024-03-04", "Coffee")).unwrap();

        let err = service
            .update(&created.id, &input("5", "2024-03-04", " "))
            .unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(service.get(&created.id).unwrap().unwrap(), created);

        let err = service
            .update(&ExpenseId::new("nope"), &input("5", "2024-03-04", "x"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_delete_expense() {
        let (_temp_dir, store, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let created = service.create(&input("5", "2024-03-04", "Coffee")).unwrap();

        let deleted = service.delete(&created.id).unwrap();
        assert_eq!(deleted, created);
        assert!(store.list().unwrap().is_empty());
        assert!(service.list().unwrap().is_empty());

        assert!(service.delete(&created.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_unwritable_audit_log_does_not_fail_stored_changes() {
        let (temp_dir, store, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        std::fs::create_dir_all(temp_dir.path().join("audit.log")).unwrap();

        let created = service.create(&input("5", "2024-03-04", "Coffee")).unwrap();
        assert_eq!(store.list().unwrap(), vec![created.clone()]);

        let updated = service
            .update(&created.id, &input("6", "2024-03-04", "Coffee"))
            .unwrap();
        assert_eq!(service.list().unwrap(), vec![updated]);

        service.delete(&created.id).unwrap();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_store_failure_leaves_collection_untouched() {
        let (_temp_dir, store, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let created = service.create(&input("5", "2024-03-04", "Coffee")).unwrap();

        store.set_offline(true);

        assert!(service
            .create(&input("7", "2024-03-05", "Tea"))
            .unwrap_err()
            .is_store());
        assert!(service
            .update(&created.id, &input("9", "2024-03-05", "Espresso"))
            .unwrap_err()
            .is_store());
        assert!(service.delete(&created.id).unwrap_err().is_store());
        assert!(service.fetch().unwrap_err().is_store());

        assert_eq!(service.list().unwrap(), vec![created]);
        assert_eq!(storage.audit().entry_count().unwrap(), 1);
    }

    #[test]
    fn test_recent_and_total() {
        let (_temp_dir, _store, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        service.create(&input("10", "2024-02-01", "Old")).unwrap();
        service.create(&input("2.5", "2024-03-05", "Snack")).unwrap();
        service.create(&input("4", "2024-03-09", "Lunch")).unwrap();

        let now = Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap();
        let recent = service.recent(now, 7).unwrap();

        let descriptions: Vec<_> = recent.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(descriptions, vec!["Lunch", "Snack"]);
        assert_eq!(ExpenseService::total(&recent).value(), 6.5);
    }

    #[test]
    fn test_find_by_prefix() {
        let (_temp_dir, _store, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let created = service.create(&input("5", "2024-03-04", "Coffee")).unwrap();

        let found = service.find(created.id.short()).unwrap().unwrap();
        assert_eq!(found, created);
        assert!(service.find("").unwrap().is_none());
        assert!(service.find("zzzz-not-an-id").unwrap().is_none());
    }

    #[test]
    fn test_form_for_edit_round_trips() {
        let (_temp_dir, _store, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let created = service.create(&input("12.5", "2024-03-04", "Books")).unwrap();

        let mut form = service.form_for(Some(&created.id)).unwrap();
        assert!(form.is_edit);
        form.set_value(ExpenseField::Description, "Used books");

        let updated = service.update(&created.id, &form.input()).unwrap();
        assert_eq!(updated.description, "Used books");
        assert_eq!(updated.date, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());

        assert!(!service.form_for(None).unwrap().is_edit);
    }
}
