//! envelope-ledger - envelope-budget ledger
//!
//! This library splits a fixed income into named categories (envelopes),
//! records expenses against them, and enforces two guards: the total
//! allocated never exceeds income, and a normal expense never exceeds its
//! category's remaining balance. Overspending is possible only through an
//! explicit override.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Money, allocations, transactions, and the budget summary
//! - `ledger`: The ledger itself and a thread-safe shared handle
//! - `error`: Custom error types
//! - `plan`: Budget plan files and their replay against a fresh ledger
//! - `display`: Terminal tables and the presentation projection
//! - `export`: JSON, YAML, and CSV snapshots
//! - `audit`: Append-only audit log of replayed mutations
//! - `config`: Configuration and path management
//! - `logging`: Tracing subscriber setup
//! - `cli`: Command handlers for the binary
//!
//! # Example
//!
//! ```
//! use envelope_ledger::{Ledger, LedgerError};
//! use envelope_ledger::models::{AllocationInput, AllocationKind, Money};
//!
//! let mut ledger = Ledger::new(Money::from_dollars(1000)).unwrap();
//! ledger
//!     .add_allocation(AllocationInput::new("Rent", Money::from_dollars(800), AllocationKind::Bills))
//!     .unwrap();
//!
//! let err = ledger
//!     .record_expense("Rent", Money::from_dollars(900), "", false)
//!     .unwrap_err();
//! assert!(matches!(err, LedgerError::InsufficientFunds { .. }));
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod ledger;
pub mod logging;
pub mod models;
pub mod plan;

pub use error::{LedgerError, LedgerResult};
pub use ledger::{IncomePolicy, Ledger, SharedLedger};
