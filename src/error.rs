//! Error types for the expense tracker
//!
//! Field validation failures and store failures are both ordinary,
//! recoverable outcomes and are modelled as variants here rather than panics.

use thiserror::Error;

use crate::services::validator::FieldErrors;

/// The main error type for expense tracker operations
#[derive(Error, Debug)]
pub enum ExpenseError {
    /// One or more form fields failed validation
    #[error("Invalid input values - please check your entered data! ({})", .0.invalid_fields().join(", "))]
    InvalidInput(FieldErrors),

    /// The expense store could not complete a list/create/update/delete call
    #[error("Store error: {0}")]
    Store(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Local storage errors (lock poisoning, unreadable files)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },
}

impl ExpenseError {
    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a field validation error
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// Check if this is a store failure
    pub fn is_store(&self) -> bool {
        matches!(self, Self::Store(_))
    }

    /// Message suitable for showing to the user.
    ///
    /// Store failures are not classified any further: the user only learns
    /// that the action failed and can be retried.
    pub fn user_message(&self) -> String {
        match self {
            Self::Store(_) => "An error occurred! Please try again.".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<std::io::Error> for ExpenseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ExpenseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for expense tracker operations
pub type ExpenseResult<T> = Result<T, ExpenseError>;
