//! Audit logging for envelope-ledger
//!
//! Records ledger mutations with before/after values in an append-only,
//! line-delimited JSON log.
//!
//! - `AuditEntry`: one operation with timestamp, entity information, and
//!   optional before/after values.
//! - `AuditLogger`: appends entries to the log file and reads them back.
//! - `generate_diff`: top-level field diff between two serialized states.
//!
//! # Example
//!
//! ```rust,ignore
//! use envelope_ledger::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! let entry = AuditEntry::update(
//!     EntityType::Allocation,
//!     "Groceries",
//!     Some("Groceries".to_string()),
//!     &before,
//!     &after,
//! );
//! logger.log(&entry)?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
