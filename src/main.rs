use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use envelope_ledger::cli::{handle_export_command, handle_replay_command, ExportArgs, ReplayArgs};
use envelope_ledger::config::{LedgerPaths, Settings};
use envelope_ledger::logging::init_tracing;

#[derive(Parser)]
#[command(
    name = "envelope-ledger",
    version,
    about = "Envelope-budget ledger driven by budget plan files",
    long_about = "envelope-ledger splits an income into named categories, records \
                  expenses against them, and guards both the total allocated and \
                  each category's remaining balance. Budget plans describe an income, \
                  an initial budget and a list of operations to replay."
)]
struct Cli {
    /// Enable debug logging for envelope-ledger
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a budget plan and show the outcome of each step
    Replay(ReplayArgs),

    /// Replay a budget plan and export the resulting ledger
    Export(ExportArgs),

    /// Write default settings
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = LedgerPaths::new().context("Failed to resolve the envelope-ledger directory")?;
    let settings = Settings::load_or_create(&paths).context("Failed to load settings")?;

    init_tracing(cli.verbose, settings.log_filter.as_deref());

    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Some(Commands::Replay(args)) => {
            let plan = args.plan.display().to_string();
            handle_replay_command(&paths, &settings, args, &mut stdout)
                .with_context(|| format!("Replay of {} failed", plan))?;
        }
        Some(Commands::Export(args)) => {
            let plan = args.plan.display().to_string();
            handle_export_command(&settings, args, &mut stdout)
                .with_context(|| format!("Export of {} failed", plan))?;
        }
        Some(Commands::Init) => {
            if paths.is_initialized() {
                println!("Already initialized at: {}", paths.base_dir().display());
            } else {
                settings.save(&paths).context("Failed to write settings")?;
                println!("Initialized envelope-ledger at: {}", paths.base_dir().display());
            }
            println!("Settings: {}", paths.settings_file().display());
        }
        Some(Commands::Config) => {
            println!("envelope-ledger Configuration");
            println!("=============================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Income policy:   {:?}", settings.income_policy);
            println!("  Audit enabled:   {}", settings.audit_enabled);
            println!(
                "  Log filter:      {}",
                settings.log_filter.as_deref().unwrap_or(envelope_ledger::logging::DEFAULT_DIRECTIVE)
            );
        }
        None => {
            println!("envelope-ledger - envelope budgeting from plan files");
            println!();
            println!("Run 'envelope-ledger --help' for usage information.");
            println!("Run 'envelope-ledger replay <plan.yaml>' to replay a budget plan.");
        }
    }

    Ok(())
}
