//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the
//! clap argument parsing with plan replay and export. Handlers write to the
//! given writer so they can be exercised without a terminal.

pub mod export;
pub mod replay;

pub use export::{handle_export_command, ExportArgs, ExportFormat, ExportWhat};
pub use replay::{handle_replay_command, OutputFormat, ReplayArgs};
