//! CSV export
//!
//! Transactions and allocations as spreadsheet-friendly rows. Money columns
//! are plain decimal strings ("124.75").

use std::io::Write;

use serde::Serialize;

use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;

#[derive(Serialize)]
struct TransactionRecord<'a> {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Category")]
    category: &'a str,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Description")]
    description: &'a str,
}

#[derive(Serialize)]
struct AllocationRecord<'a> {
    #[serde(rename = "Category")]
    name: &'a str,
    #[serde(rename = "Type")]
    kind: String,
    #[serde(rename = "Budgeted")]
    amount: String,
    #[serde(rename = "Spent")]
    spent: String,
    #[serde(rename = "Remaining")]
    remaining: String,
}

fn export_error(e: csv::Error) -> LedgerError {
    LedgerError::Export(e.to_string())
}

/// Export the expense log to CSV
pub fn export_transactions_csv<W: Write>(ledger: &Ledger, writer: W) -> LedgerResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    let transactions = ledger.transactions();

    if transactions.is_empty() {
        csv.write_record(["ID", "Date", "Category", "Amount", "Description"])
            .map_err(export_error)?;
    }

    for txn in &transactions {
        csv.serialize(TransactionRecord {
            id: txn.id.to_string(),
            date: txn.recorded_at.to_rfc3339(),
            category: &txn.category_name,
            amount: txn.amount.to_decimal_string(),
            description: &txn.description,
        })
        .map_err(export_error)?;
    }

    csv.flush().map_err(|e| LedgerError::Export(e.to_string()))?;
    Ok(())
}

/// Export the allocations to CSV
pub fn export_allocations_csv<W: Write>(ledger: &Ledger, writer: W) -> LedgerResult<()> {
    let mut csv = csv::Writer::from_writer(writer);

    if ledger.allocations().is_empty() {
        csv.write_record(["Category", "Type", "Budgeted", "Spent", "Remaining"])
            .map_err(export_error)?;
    }

    for allocation in ledger.allocations() {
        csv.serialize(AllocationRecord {
            name: &allocation.name,
            kind: allocation.kind.to_string(),
            amount: allocation.amount.to_decimal_string(),
            spent: allocation.spent().to_decimal_string(),
            remaining: allocation.remaining.to_decimal_string(),
        })
        .map_err(export_error)?;
    }

    csv.flush().map_err(|e| LedgerError::Export(e.to_string()))?;
    Ok(())
}
