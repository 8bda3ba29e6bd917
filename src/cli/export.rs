//! CLI command for exporting the ledger a plan produces

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use super::replay::run_plan;
use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::export::{csv, json, yaml};
use crate::ledger::Ledger;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Full snapshot as JSON
    Json,
    /// Full snapshot as YAML
    Yaml,
    /// One table as CSV (see --what)
    Csv,
}

/// Which table a CSV export contains
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ExportWhat {
    #[default]
    Transactions,
    Allocations,
}

/// Arguments for `export`
#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Budget plan file (.yaml, .yml or .json)
    pub plan: PathBuf,

    /// Export format
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Json)]
    pub format: ExportFormat,

    /// Table to export with --format csv
    #[arg(short, long, value_enum, default_value_t = ExportWhat::Transactions)]
    pub what: ExportWhat,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle the export command
///
/// The plan is replayed without stopping on rejections; the export reflects
/// the final ledger state.
pub fn handle_export_command<W: Write>(
    settings: &Settings,
    args: ExportArgs,
    stdout: &mut W,
) -> LedgerResult<()> {
    let report = run_plan(&args.plan, settings, false)?;

    match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                LedgerError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            write_export(&report.ledger, args.format, args.what, &mut writer)?;
            writer
                .flush()
                .map_err(|e| LedgerError::Export(e.to_string()))?;

            tracing::info!(path = %path.display(), format = ?args.format, "ledger exported");
            writeln!(stdout, "Exported to: {}", path.display())?;
        }
        None => write_export(&report.ledger, args.format, args.what, stdout)?,
    }

    Ok(())
}

fn write_export<W: Write>(
    ledger: &Ledger,
    format: ExportFormat,
    what: ExportWhat,
    writer: &mut W,
) -> LedgerResult<()> {
    match (format, what) {
        (ExportFormat::Json, _) => json::export_ledger_json(ledger, writer),
        (ExportFormat::Yaml, _) => yaml::export_ledger_yaml(ledger, writer),
        (ExportFormat::Csv, ExportWhat::Transactions) => csv::export_transactions_csv(ledger, writer),
        (ExportFormat::Csv, ExportWhat::Allocations) => csv::export_allocations_csv(ledger, writer),
    }
}
