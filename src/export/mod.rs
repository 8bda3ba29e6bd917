//! Export module for envelope-ledger
//!
//! Writes a ledger snapshot in several formats:
//! - CSV: transactions or allocations (spreadsheet-compatible)
//! - JSON: machine-readable full snapshot
//! - YAML: human-readable full snapshot

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_allocations_csv, export_transactions_csv};
pub use self::json::{export_ledger_json, import_from_json, LedgerExport, EXPORT_SCHEMA_VERSION};
pub use self::yaml::{export_ledger_yaml, import_from_yaml};
