//! Expense Tracker - record expenses and review the recent ones
//!
//! # Architecture
//!
//! - `config`: configuration and path management
//! - `error`: custom error types
//! - `models`: expenses, ids and amounts
//! - `form`: add/edit form state with per-field validity
//! - `storage`: the expense store, the in-memory collection and JSON file I/O
//! - `services`: validation, recent-window selection and orchestration
//! - `audit`: append-only audit log of changes
//! - `display`, `cli`: terminal front end
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::config::{ExpensePaths, Settings};
//! use expense_tracker::services::{ExpenseInput, ExpenseService};
//! use expense_tracker::storage::Storage;
//!
//! let paths = ExpensePaths::new()?;
//! let storage = Storage::new(paths)?;
//! let service = ExpenseService::new(&storage);
//! service.fetch()?;
//! service.create(&ExpenseInput::new("12.50", "2024-03-04", "Books"))?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod form;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
