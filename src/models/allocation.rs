//! Allocation model
//!
//! An allocation is one envelope: a named ceiling carved out of income,
//! plus the balance still available to spend against it.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Classification of an allocation. Affects no arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum AllocationKind {
    /// Day-to-day spending (default)
    #[default]
    #[serde(alias = "expense")]
    Expense,
    /// Money set aside
    #[serde(alias = "saving")]
    Saving,
    /// Recurring obligations
    #[serde(alias = "bills")]
    Bills,
}

impl AllocationKind {
    /// All kinds, in display order
    pub const ALL: [AllocationKind; 3] = [Self::Expense, Self::Saving, Self::Bills];
}

impl fmt::Display for AllocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expense => write!(f, "EXPENSE"),
            Self::Saving => write!(f, "SAVING"),
            Self::Bills => write!(f, "BILLS"),
        }
    }
}

impl std::str::FromStr for AllocationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "expense" | "expenses" => Ok(Self::Expense),
            "saving" | "savings" => Ok(Self::Saving),
            "bills" | "bill" => Ok(Self::Bills),
            other => Err(format!("unknown allocation kind: {}", other)),
        }
    }
}

/// Definition of a category, as supplied by callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationInput {
    /// Category name, the lookup key
    pub name: String,

    /// Ceiling for the period
    pub amount: Money,

    /// Classification
    #[serde(default, rename = "type", alias = "kind")]
    pub kind: AllocationKind,
}

impl AllocationInput {
    /// Create a new allocation input
    pub fn new(name: impl Into<String>, amount: Money, kind: AllocationKind) -> Self {
        Self {
            name: name.into(),
            amount,
            kind,
        }
    }

    /// Validate the input
    pub fn validate(&self) -> Result<(), AllocationValidationError> {
        validate_name(&self.name)?;

        if !self.amount.is_positive() {
            return Err(AllocationValidationError::NonPositiveAmount(self.amount));
        }

        Ok(())
    }
}

/// Check that a category name is usable as a key
pub(crate) fn validate_name(name: &str) -> Result<(), AllocationValidationError> {
    if name.trim().is_empty() {
        return Err(AllocationValidationError::EmptyName);
    }
    Ok(())
}

/// A budget category with its live balance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// Category name, unique within a ledger
    pub name: String,

    /// Ceiling for the period
    pub amount: Money,

    /// Classification
    #[serde(rename = "type", alias = "kind")]
    pub kind: AllocationKind,

    /// `amount` minus everything spent against this category.
    /// Negative only after an overspend override.
    pub remaining: Money,
}

impl Allocation {
    /// Create a fresh allocation with nothing spent
    pub fn from_input(input: AllocationInput) -> Self {
        Self {
            name: input.name,
            amount: input.amount,
            kind: input.kind,
            remaining: input.amount,
        }
    }

    /// Amount spent so far
    pub fn spent(&self) -> Money {
        self.amount - self.remaining
    }

    /// Check if this category has been overspent
    pub fn is_overspent(&self) -> bool {
        self.remaining.is_negative()
    }

    /// Restore the full ceiling
    pub(crate) fn refill(&mut self) {
        self.remaining = self.amount;
    }
}

impl fmt::Display for Allocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {} of {} remaining",
            self.name, self.kind, self.remaining, self.amount
        )
    }
}

/// Partial update to an existing allocation; `None` fields are left alone
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,

    #[serde(default, rename = "type", alias = "kind", skip_serializing_if = "Option::is_none")]
    pub kind: Option<AllocationKind>,
}

impl AllocationUpdate {
    /// Rename the category
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Change the ceiling
    pub fn amount(amount: Money) -> Self {
        Self {
            amount: Some(amount),
            ..Self::default()
        }
    }

    /// Change the classification
    pub fn kind(kind: AllocationKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    /// Check whether the update changes anything at all
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.amount.is_none() && self.kind.is_none()
    }
}

/// Validation errors for allocation input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocationValidationError {
    EmptyName,
    NonPositiveAmount(Money),
}

impl fmt::Display for AllocationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Allocation amount must be greater than zero, got {}", amount)
            }
        }
    }
}

impl std::error::Error for AllocationValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_input_starts_full() {
        let input = AllocationInput::new("Groceries", Money::from_dollars(600), AllocationKind::Expense);
        let allocation = Allocation::from_input(input);

        assert_eq!(allocation.remaining, allocation.amount);
        assert!(allocation.spent().is_zero());
        assert!(!allocation.is_overspent());
    }

    #[test]
    fn test_validation() {
        let ok = AllocationInput::new("Rent", Money::from_dollars(1200), AllocationKind::Bills);
        assert!(ok.validate().is_ok());

        let blank = AllocationInput::new("   ", Money::from_dollars(10), AllocationKind::Bills);
        assert_eq!(blank.validate(), Err(AllocationValidationError::EmptyName));

        let zero = AllocationInput::new("Rent", Money::zero(), AllocationKind::Bills);
        assert!(matches!(
            zero.validate(),
            Err(AllocationValidationError::NonPositiveAmount(_))
        ));
    }

    #[test]
    fn test_spent_with_overspend() {
        let mut allocation = Allocation::from_input(AllocationInput::new(
            "Dining",
            Money::from_dollars(100),
            AllocationKind::Expense,
        ));
        allocation.remaining = Money::from_dollars(-20);

        assert!(allocation.is_overspent());
        assert_eq!(allocation.spent(), Money::from_dollars(120));

        allocation.refill();
        assert_eq!(allocation.remaining, Money::from_dollars(100));
    }

    #[test]
    fn test_kind_serialization() {
        assert_eq!(serde_json::to_string(&AllocationKind::Saving).unwrap(), "\"SAVING\"");
        let kind: AllocationKind = serde_json::from_str("\"BILLS\"").unwrap();
        assert_eq!(kind, AllocationKind::Bills);
        let kind: AllocationKind = serde_json::from_str("\"saving\"").unwrap();
        assert_eq!(kind, AllocationKind::Saving);
        assert_eq!(AllocationKind::Expense.to_string(), "EXPENSE");
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("savings".parse::<AllocationKind>(), Ok(AllocationKind::Saving));
        assert_eq!("EXPENSE".parse::<AllocationKind>(), Ok(AllocationKind::Expense));
        assert!("luxury".parse::<AllocationKind>().is_err());
    }

    #[test]
    fn test_input_accepts_type_or_kind_key() {
        let by_type: AllocationInput =
            serde_json::from_str(r#"{"name":"Rent","amount":120000,"type":"BILLS"}"#).unwrap();
        let by_kind: AllocationInput =
            serde_json::from_str(r#"{"name":"Rent","amount":120000,"kind":"BILLS"}"#).unwrap();
        assert_eq!(by_type, by_kind);
    }

    #[test]
    fn test_update_builders() {
        assert!(AllocationUpdate::default().is_empty());
        assert_eq!(AllocationUpdate::rename("Food").name.as_deref(), Some("Food"));
        assert_eq!(
            AllocationUpdate::amount(Money::from_dollars(5)).amount,
            Some(Money::from_dollars(5))
        );
        assert!(!AllocationUpdate::kind(AllocationKind::Saving).is_empty());
    }
}
