//! Expense transaction model
//!
//! One immutable spend event. Transactions reference their category by
//! the name it had when the expense was recorded; renaming or removing the
//! category later does not touch the record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::TransactionId;
use super::money::Money;

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseTransaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Name of the category at recording time
    pub category_name: String,

    /// Amount spent (always positive)
    pub amount: Money,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// When the expense was recorded
    #[serde(rename = "date", alias = "recorded_at")]
    pub recorded_at: DateTime<Utc>,
}

impl ExpenseTransaction {
    /// Create a new transaction stamped with the current time
    pub fn new(category_name: impl Into<String>, amount: Money, description: impl Into<String>) -> Self {
        Self {
            id: TransactionId::new(),
            category_name: category_name.into(),
            amount,
            description: description.into(),
            recorded_at: Utc::now(),
        }
    }
}

impl fmt::Display for ExpenseTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.recorded_at.format("%Y-%m-%d"),
            self.category_name,
            self.amount
        )?;
        if !self.description.is_empty() {
            write!(f, " - {}", self.description)?;
        }
        Ok(())
    }
}
