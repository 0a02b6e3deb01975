//! Service layer for the expense tracker
//!
//! Pure expense rules (validation, recent-window selection) and the
//! orchestration that applies them against storage.

pub mod expense;
pub mod recent;
pub mod validator;

pub use expense::ExpenseService;
pub use recent::{select_recent, DEFAULT_WINDOW_DAYS};
pub use validator::{validate, ExpenseInput, FieldErrors};
