//! YAML export
//!
//! Same structure as the JSON export, behind a header comment.

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::export::json::LedgerExport;
use crate::ledger::Ledger;

/// Write a ledger snapshot as YAML
pub fn export_ledger_yaml<W: Write>(ledger: &Ledger, writer: &mut W) -> LedgerResult<()> {
    let export = LedgerExport::from_ledger(ledger);
    let err = |e: std::io::Error| LedgerError::Export(e.to_string());

    writeln!(writer, "# envelope-ledger export").map_err(err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(err)?;
    writeln!(writer, "# Amounts are in cents.").map_err(err)?;
    writeln!(writer).map_err(err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| LedgerError::Export(e.to_string()))?;

    Ok(())
}

/// Parse and validate a YAML export
pub fn import_from_yaml(yaml_str: &str) -> LedgerResult<LedgerExport> {
    let export: LedgerExport =
        serde_yaml::from_str(yaml_str).map_err(|e| LedgerError::Yaml(e.to_string()))?;
    export.validate().map_err(LedgerError::Export)?;
    Ok(export)
}
