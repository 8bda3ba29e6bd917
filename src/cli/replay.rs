//! CLI command for replaying a budget plan

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use serde::Serialize;

use crate::audit::AuditLogger;
use crate::config::{LedgerPaths, Settings};
use crate::display::{self, ExtendedSummary};
use crate::error::{LedgerError, LedgerResult};
use crate::models::ExpenseTransaction;
use crate::plan::{replay, BudgetPlan, ReplayOptions, ReplayReport, StepOutcome};

/// Output format for replay results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Terminal tables
    #[default]
    Table,
    Json,
    Yaml,
}

/// Arguments for `replay`
#[derive(Args, Debug, Clone)]
pub struct ReplayArgs {
    /// Budget plan file (.yaml, .yml or .json)
    pub plan: PathBuf,

    /// Stop at the first rejected step and exit with an error
    #[arg(long)]
    pub strict: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Include the transaction register
    #[arg(short, long)]
    pub transactions: bool,
}

#[derive(Serialize)]
struct ReplayView<'a> {
    outcomes: &'a [StepOutcome],
    summary: ExtendedSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    transactions: Option<Vec<ExpenseTransaction>>,
    halted: bool,
}

/// Load a plan and replay it with the configured options
pub(crate) fn run_plan(plan_path: &Path, settings: &Settings, strict: bool) -> LedgerResult<ReplayReport> {
    let plan = BudgetPlan::from_path(plan_path)?;
    let options = ReplayOptions {
        stop_on_rejection: strict,
        policy: settings.income_policy,
    };
    replay(&plan, &options)
}

/// Handle the replay command
pub fn handle_replay_command<W: Write>(
    paths: &LedgerPaths,
    settings: &Settings,
    args: ReplayArgs,
    out: &mut W,
) -> LedgerResult<()> {
    let report = run_plan(&args.plan, settings, args.strict)?;

    if settings.audit_enabled {
        AuditLogger::new(paths.audit_log()).log_batch(&report.audit)?;
    }

    let summary = report.ledger.budget_summary();
    let symbol = settings.currency_symbol.as_str();

    match args.format {
        OutputFormat::Table => {
            writeln!(out, "{}", display::format_replay_outcomes(&report))?;
            writeln!(out, "{}", display::format_budget_summary(&summary, symbol))?;
            if args.transactions {
                writeln!(
                    out,
                    "{}",
                    display::format_transaction_register(&report.ledger.transactions(), symbol)
                )?;
            }
        }
        OutputFormat::Json | OutputFormat::Yaml => {
            let view = ReplayView {
                outcomes: &report.outcomes,
                summary: display::extend_summary(&summary),
                transactions: args.transactions.then(|| report.ledger.transactions()),
                halted: report.halted,
            };
            if args.format == OutputFormat::Json {
                serde_json::to_writer_pretty(&mut *out, &view)?;
                writeln!(out)?;
            } else {
                serde_yaml::to_writer(&mut *out, &view)?;
            }
        }
    }

    if args.strict {
        if let Some(rejected) = report.rejections().next() {
            return Err(LedgerError::Plan(format!(
                "step {} ({}) rejected: {}",
                rejected.index,
                rejected.description,
                rejected.error().map(ToString::to_string).unwrap_or_default()
            )));
        }
    }

    Ok(())
}
