//! Core data models for envelope-ledger
//!
//! This module contains the data structures of the envelope-budget domain:
//! money, allocations, expense transactions, and summaries.

pub mod allocation;
pub mod ids;
pub mod money;
pub mod summary;
pub mod transaction;

pub use allocation::{
    Allocation, AllocationInput, AllocationKind, AllocationUpdate, AllocationValidationError,
};
pub use ids::TransactionId;
pub use money::{Money, MoneyParseError};
pub use summary::BudgetSummary;
pub use transaction::ExpenseTransaction;
