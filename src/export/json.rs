//! JSON export
//!
//! Serializes a ledger snapshot with schema versioning. Money is written as
//! integer cents.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::models::{Allocation, BudgetSummary, ExpenseTransaction, Money};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Complete ledger snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub income: Money,

    /// Allocations in insertion order
    pub allocations: Vec<Allocation>,

    /// Expense log, oldest first
    pub transactions: Vec<ExpenseTransaction>,

    pub summary: BudgetSummary,
}

impl LedgerExport {
    /// Snapshot a ledger
    pub fn from_ledger(ledger: &Ledger) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            income: ledger.income(),
            allocations: ledger.allocations().to_vec(),
            transactions: ledger.transactions(),
            summary: ledger.budget_summary(),
        }
    }

    /// Check the schema version and that the summary matches the data
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        let expected = BudgetSummary::compute(self.income, &self.allocations);
        if expected != self.summary {
            return Err("Summary does not match allocations".to_string());
        }

        Ok(())
    }
}

/// Write a ledger snapshot as pretty-printed JSON
pub fn export_ledger_json<W: Write>(ledger: &Ledger, writer: &mut W) -> LedgerResult<()> {
    let export = LedgerExport::from_ledger(ledger);
    serde_json::to_writer_pretty(&mut *writer, &export)
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| LedgerError::Export(e.to_string()))?;
    Ok(())
}

/// Parse and validate a JSON export
pub fn import_from_json(json_str: &str) -> LedgerResult<LedgerExport> {
    let export: LedgerExport =
        serde_json::from_str(json_str).map_err(|e| LedgerError::Json(e.to_string()))?;
    export.validate().map_err(LedgerError::Export)?;
    Ok(export)
}
