//! Transaction display formatting
//!
//! Renders the expense log as a register table.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use super::truncate;
use crate::models::{ExpenseTransaction, Money};

const DESCRIPTION_WIDTH: usize = 32;

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Description")]
    description: String,
}

/// Format the expense log as a register
pub fn format_transaction_register(transactions: &[ExpenseTransaction], symbol: &str) -> String {
    if transactions.is_empty() {
        return "No transactions recorded.".to_string();
    }

    let rows = transactions.iter().map(|t| TransactionRow {
        id: t.id.short(),
        date: t.recorded_at.format("%Y-%m-%d %H:%M").to_string(),
        category: t.category_name.clone(),
        amount: t.amount.format_with_symbol(symbol),
        description: truncate(&t.description, DESCRIPTION_WIDTH),
    });

    let total: Money = transactions.iter().map(|t| t.amount).sum();

    let mut output = Table::new(rows)
        .with(Style::psql())
        .with(Modify::new(Columns::new(3..4)).with(Alignment::right()))
        .to_string();
    output.push_str(&format!(
        "\n{} transactions, {} total\n",
        transactions.len(),
        total.format_with_symbol(symbol)
    ));
    output
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &ExpenseTransaction, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", txn.recorded_at.format("%Y-%m-%d %H:%M:%S UTC")));
    output.push_str(&format!("Category:    {}\n", txn.category_name));
    output.push_str(&format!("Amount:      {}\n", txn.amount.format_with_symbol(symbol)));

    if !txn.description.is_empty() {
        output.push_str(&format!("Description: {}\n", txn.description));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_register() {
        let transactions = vec![
            ExpenseTransaction::new("Groceries", Money::from_cents(12475), "Weekly shop"),
            ExpenseTransaction::new("Groceries", Money::from_dollars(600), ""),
        ];

        let register = format_transaction_register(&transactions, "$");
        assert!(register.contains("Weekly shop"));
        assert!(register.contains("$124.75"));
        assert!(register.contains(&transactions[0].id.short()));
        assert!(register.contains("2 transactions, $724.75 total"));
    }

    #[test]
    fn test_format_empty_register() {
        assert_eq!(format_transaction_register(&[], "$"), "No transactions recorded.");
    }

    #[test]
    fn test_format_transaction_details() {
        let txn = ExpenseTransaction::new("Groceries", Money::from_cents(5000), "Test memo");

        let formatted = format_transaction_details(&txn, "£");
        assert!(formatted.contains("Groceries"));
        assert!(formatted.contains("£50.00"));
        assert!(formatted.contains("Test memo"));
    }
}
