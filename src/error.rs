//! Custom error types for envelope-ledger
//!
//! This module defines the error hierarchy for the ledger using thiserror
//! for ergonomic error definitions. The first six variants are the ledger's
//! own rejections; the rest come from the surrounding tooling (config, plan
//! files, exports).

use thiserror::Error;

use crate::models::Money;

/// The main error type for envelope-ledger operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Non-positive amount supplied to an expense, update, or income operation
    #[error("Invalid amount: {0} (must be greater than zero)")]
    InvalidAmount(Money),

    /// Malformed allocation input (empty name, non-positive amount)
    #[error("Invalid allocation '{name}': {reason}")]
    InvalidAllocation { name: String, reason: String },

    /// A category with this name already exists
    #[error("Category already exists: {0}")]
    DuplicateCategory(String),

    /// No category with this name
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// Committing the allocation would push total allocations above income
    #[error("Total allocations would exceed income: allocated {allocated}, income {income}")]
    BudgetExceedsIncome { allocated: Money, income: Money },

    /// Expense exceeds remaining balance and no override was granted
    #[error("Insufficient funds in category '{category}': need {needed}, have {available}")]
    InsufficientFunds {
        category: String,
        needed: Money,
        available: Money,
    },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML serialization/deserialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// Malformed budget plan
    #[error("Plan error: {0}")]
    Plan(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// A thread panicked while holding the shared ledger lock
    #[error("Ledger lock poisoned")]
    Poisoned,
}

impl LedgerError {
    /// Create a "not found" error for a category name
    pub fn category_not_found(name: impl Into<String>) -> Self {
        Self::CategoryNotFound(name.into())
    }

    /// Create a "duplicate" error for a category name
    pub fn duplicate_category(name: impl Into<String>) -> Self {
        Self::DuplicateCategory(name.into())
    }

    /// Create an "invalid allocation" error
    pub fn invalid_allocation(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidAllocation {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::CategoryNotFound(_))
    }

    /// Check if this is one of the ledger's own rejections (caller-correctable
    /// input or a legitimate insufficient-funds state)
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::InvalidAmount(_)
                | Self::InvalidAllocation { .. }
                | Self::DuplicateCategory(_)
                | Self::CategoryNotFound(_)
                | Self::BudgetExceedsIncome { .. }
                | Self::InsufficientFunds { .. }
        )
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for LedgerError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

/// Result type alias for envelope-ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
