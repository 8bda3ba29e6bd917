//! Budget display formatting
//!
//! Renders a budget summary as an allocation table followed by totals.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use super::projection::{extend_summary, ExtendedAllocation};
use crate::models::{AllocationKind, BudgetSummary, Money};

#[derive(Tabled)]
struct AllocationRow {
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Budgeted")]
    amount: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl AllocationRow {
    fn new(allocation: &ExtendedAllocation, symbol: &str) -> Self {
        Self {
            name: allocation.name.clone(),
            kind: allocation.kind.to_string(),
            amount: allocation.amount.format_with_symbol(symbol),
            spent: allocation.spent.format_with_symbol(symbol),
            remaining: allocation.remaining.format_with_symbol(symbol),
            status: status(allocation),
        }
    }
}

fn status(allocation: &ExtendedAllocation) -> String {
    if allocation.remaining.is_negative() {
        "OVERSPENT".to_string()
    } else if allocation.remaining.is_zero() {
        "empty".to_string()
    } else {
        String::new()
    }
}

/// Format the allocation table with a currency symbol
pub fn format_allocation_table(summary: &BudgetSummary, symbol: &str) -> String {
    if summary.allocations.is_empty() {
        return "No allocations.".to_string();
    }

    let extended = extend_summary(summary);
    let rows = extended
        .allocations
        .iter()
        .map(|a| AllocationRow::new(a, symbol));

    Table::new(rows)
        .with(Style::psql())
        .with(Modify::new(Columns::new(2..5)).with(Alignment::right()))
        .to_string()
}

/// Format the summary totals block
pub fn format_totals(summary: &BudgetSummary, symbol: &str) -> String {
    let money = |m: Money| m.format_with_symbol(symbol);

    let mut output = String::new();
    output.push_str(&format!("Income:       {:>12}\n", money(summary.total_income)));
    output.push_str(&format!("Allocated:    {:>12}\n", money(summary.total_allocated)));
    output.push_str(&format!("Spent:        {:>12}\n", money(summary.total_spent())));
    output.push_str(&format!("Remaining:    {:>12}\n", money(summary.total_remaining)));
    output.push_str(&format!("Unallocated:  {:>12}\n", money(summary.unallocated)));

    let by_kind: Vec<_> = AllocationKind::ALL
        .iter()
        .map(|kind| format!("{} {}", kind, money(summary.allocated_for_kind(*kind))))
        .collect();
    output.push_str(&format!("By type:      {}\n", by_kind.join(" | ")));

    if summary.unallocated.is_negative() {
        output.push_str("\nWarning: allocations exceed income\n");
    }

    let overspent: Vec<_> = summary.overspent().map(|a| a.name.as_str()).collect();
    if !overspent.is_empty() {
        output.push_str(&format!("\nOverspent: {}\n", overspent.join(", ")));
    }

    output
}

/// Format a full budget summary: allocation table then totals
pub fn format_budget_summary(summary: &BudgetSummary, symbol: &str) -> String {
    format!(
        "{}\n\n{}",
        format_allocation_table(summary, symbol),
        format_totals(summary, symbol)
    )
}
