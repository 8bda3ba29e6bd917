//! Presentation projection of a budget summary
//!
//! Adds chart-friendly fields (a synthetic id, a palette color, the spent
//! amount) to each allocation. The projection is one-way: nothing here is
//! ever fed back into the ledger.

use serde::Serialize;

use crate::models::{Allocation, AllocationKind, BudgetSummary, Money};

/// Colors assigned to allocations by position, cycling after the tenth
pub const PALETTE: [&str; 10] = [
    "#4299E1", // blue
    "#48BB78", // green
    "#ED8936", // orange
    "#9F7AEA", // purple
    "#F56565", // red
    "#38B2AC", // teal
    "#ED64A6", // pink
    "#667EEA", // indigo
    "#F6AD55", // light orange
    "#4FD1C5", // light teal
];

/// An allocation with presentation fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtendedAllocation {
    pub id: String,
    pub name: String,
    pub amount: Money,
    #[serde(rename = "type")]
    pub kind: AllocationKind,
    pub remaining: Money,
    pub spent: Money,
    pub color: &'static str,
}

/// A budget summary with presentation fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtendedSummary {
    pub total_income: Money,
    pub total_allocated: Money,
    pub total_remaining: Money,
    pub unallocated: Money,
    /// Same as `total_allocated`
    pub total_amount: Money,
    pub total_spent: Money,
    pub allocations: Vec<ExtendedAllocation>,
}

/// Synthetic id for the allocation at `index`
///
/// `allocation-{index}-{name}` with the name lowercased and each run of
/// whitespace replaced by a single `-`.
pub fn allocation_id(index: usize, name: &str) -> String {
    let slug = name
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");

    // Leading or trailing whitespace still produces a separator.
    let lead = if name.starts_with(char::is_whitespace) { "-" } else { "" };
    let trail = if name.ends_with(char::is_whitespace) && !slug.is_empty() {
        "-"
    } else {
        ""
    };

    format!("allocation-{}-{}{}{}", index, lead, slug, trail)
}

/// Palette color for the allocation at `index`
pub fn color_for(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

pub fn extend_allocation(allocation: &Allocation, index: usize) -> ExtendedAllocation {
    ExtendedAllocation {
        id: allocation_id(index, &allocation.name),
        name: allocation.name.clone(),
        amount: allocation.amount,
        kind: allocation.kind,
        remaining: allocation.remaining,
        spent: allocation.spent(),
        color: color_for(index),
    }
}

pub fn extend_summary(summary: &BudgetSummary) -> ExtendedSummary {
    let allocations: Vec<_> = summary
        .allocations
        .iter()
        .enumerate()
        .map(|(i, a)| extend_allocation(a, i))
        .collect();
    let total_spent = allocations.iter().map(|a| a.spent).sum();

    ExtendedSummary {
        total_income: summary.total_income,
        total_allocated: summary.total_allocated,
        total_remaining: summary.total_remaining,
        unallocated: summary.unallocated,
        total_amount: summary.total_allocated,
        total_spent,
        allocations,
    }
}
