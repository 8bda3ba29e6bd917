//! Display formatting for terminal output
//!
//! Provides utilities for formatting ledger state for terminal display:
//! budget tables, the transaction register, replay outcomes, and the
//! presentation projection used by chart-style frontends.

pub mod budget;
pub mod projection;
pub mod replay;
pub mod transaction;

pub use budget::{format_allocation_table, format_budget_summary, format_totals};
pub use projection::{extend_allocation, extend_summary, ExtendedAllocation, ExtendedSummary};
pub use replay::format_replay_outcomes;
pub use transaction::{format_transaction_details, format_transaction_register};

/// Truncate a string to at most `max_len` characters, ending in "..."
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 5), "He...");
        assert_eq!(truncate("Hi", 5), "Hi");
        assert_eq!(truncate("Test", 4), "Test");
        assert_eq!(truncate("Crème brûlée", 8), "Crème...");
        assert_eq!(truncate("abcdef", 2), "..");
    }
}
