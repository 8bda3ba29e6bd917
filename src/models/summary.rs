//! Budget summary
//!
//! Aggregate view of a ledger at one instant. Always built fresh from the
//! ledger state; it owns its data, so callers may mutate it freely.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::allocation::{Allocation, AllocationKind};
use super::money::Money;

/// Totals plus a snapshot of every allocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetSummary {
    /// Income for the period
    pub total_income: Money,

    /// Sum of every allocation's ceiling
    pub total_allocated: Money,

    /// Sum of every allocation's remaining balance (negative when overspent)
    pub total_remaining: Money,

    /// Income not yet assigned to any category
    pub unallocated: Money,

    /// Allocation snapshot, in insertion order
    pub allocations: Vec<Allocation>,
}

impl BudgetSummary {
    /// Build a summary from income and the current allocations
    pub fn compute(income: Money, allocations: &[Allocation]) -> Self {
        let total_allocated: Money = allocations.iter().map(|a| a.amount).sum();
        let total_remaining: Money = allocations.iter().map(|a| a.remaining).sum();

        Self {
            total_income: income,
            total_allocated,
            total_remaining,
            unallocated: income - total_allocated,
            allocations: allocations.to_vec(),
        }
    }

    /// Total spent across all current allocations
    pub fn total_spent(&self) -> Money {
        self.total_allocated - self.total_remaining
    }

    /// Allocations whose remaining balance is negative
    pub fn overspent(&self) -> impl Iterator<Item = &Allocation> {
        self.allocations.iter().filter(|a| a.is_overspent())
    }

    /// Sum of ceilings for one kind
    pub fn allocated_for_kind(&self, kind: AllocationKind) -> Money {
        self.allocations
            .iter()
            .filter(|a| a.kind == kind)
            .map(|a| a.amount)
            .sum()
    }
}

impl fmt::Display for BudgetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Income: {} | Allocated: {} | Remaining: {} | Unallocated: {}",
            self.total_income, self.total_allocated, self.total_remaining, self.unallocated
        )
    }
}
