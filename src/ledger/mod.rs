//! The envelope-budget ledger
//!
//! [`Ledger`] owns the income, the ordered set of category allocations, and
//! the append-only expense log. Every operation is a single transition from
//! one valid state to another; a failing call leaves the ledger untouched.
//!
//! Two guards protect the state:
//!
//! - the income guard: creating an allocation, or changing an allocation's
//!   amount, must leave the sum of all amounts at or below income;
//! - the spend guard: a normal expense may not exceed the category's
//!   remaining balance. Callers can override it explicitly, which drives the
//!   balance negative.
//!
//! # Example
//!
//! ```
//! use envelope_ledger::ledger::Ledger;
//! use envelope_ledger::models::{AllocationInput, AllocationKind, Money};
//!
//! let mut ledger = Ledger::new(Money::from_dollars(5000)).unwrap();
//! ledger
//!     .create_budget(vec![
//!         AllocationInput::new("Groceries", Money::from_dollars(600), AllocationKind::Expense),
//!         AllocationInput::new("EmergencyFund", Money::from_dollars(700), AllocationKind::Saving),
//!     ])
//!     .unwrap();
//!
//! ledger
//!     .record_expense("Groceries", Money::from_cents(12475), "Weekly shop", false)
//!     .unwrap();
//! assert_eq!(ledger.remaining_amount("Groceries").unwrap(), Money::from_cents(47525));
//! ```

mod shared;

pub use shared::SharedLedger;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::models::allocation::validate_name;
use crate::models::{
    Allocation, AllocationInput, AllocationUpdate, BudgetSummary, ExpenseTransaction, Money,
    TransactionId,
};

/// How `update_monthly_income` treats allocations that no longer fit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IncomePolicy {
    /// Replace income without re-checking existing allocations (default)
    #[default]
    Lenient,
    /// Reject an income change that would leave allocations above income
    Strict,
}

impl std::str::FromStr for IncomePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            other => Err(format!("unknown income policy: {}", other)),
        }
    }
}

/// Income, allocations and the expense log, guarded as one unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ledger {
    income: Money,
    allocations: Vec<Allocation>,
    transactions: Vec<ExpenseTransaction>,
    #[serde(skip)]
    policy: IncomePolicy,
}

impl Ledger {
    /// Create an empty ledger for the given income
    pub fn new(income: Money) -> LedgerResult<Self> {
        Self::with_policy(income, IncomePolicy::default())
    }

    /// Create an empty ledger with an explicit income policy
    pub fn with_policy(income: Money, policy: IncomePolicy) -> LedgerResult<Self> {
        if !income.is_positive() {
            return Err(LedgerError::InvalidAmount(income));
        }

        debug!(%income, ?policy, "ledger created");
        Ok(Self {
            income,
            allocations: Vec::new(),
            transactions: Vec::new(),
            policy,
        })
    }

    /// Current income
    pub fn income(&self) -> Money {
        self.income
    }

    /// Income policy this ledger was built with
    pub fn policy(&self) -> IncomePolicy {
        self.policy
    }

    /// Read-only view of the allocations, in insertion order
    pub fn allocations(&self) -> &[Allocation] {
        &self.allocations
    }

    /// Sum of every allocation's ceiling
    pub fn total_allocated(&self) -> Money {
        self.allocations.iter().map(|a| a.amount).sum()
    }

    /// Replace the whole allocation set
    ///
    /// Every entry needs a non-empty name and a positive amount, names must be
    /// unique, and the total must fit within income. Existing transactions are
    /// kept.
    pub fn create_budget(&mut self, inputs: Vec<AllocationInput>) -> LedgerResult<()> {
        let mut seen = HashSet::with_capacity(inputs.len());
        let mut total = Some(Money::zero());

        for input in &inputs {
            input
                .validate()
                .map_err(|e| LedgerError::invalid_allocation(&input.name, e.to_string()))
                .map_err(|e| rejected("create_budget", e))?;

            if !seen.insert(input.name.as_str()) {
                return Err(rejected(
                    "create_budget",
                    LedgerError::duplicate_category(&input.name),
                ));
            }

            total = total.and_then(|t| t.checked_add(input.amount));
        }

        let total = self.check_income_guard("create_budget", total)?;

        self.allocations = inputs.into_iter().map(Allocation::from_input).collect();
        info!(
            categories = self.allocations.len(),
            allocated = %total,
            "budget created"
        );
        Ok(())
    }

    /// Append a single allocation
    pub fn add_allocation(&mut self, input: AllocationInput) -> LedgerResult<()> {
        input
            .validate()
            .map_err(|e| LedgerError::invalid_allocation(&input.name, e.to_string()))
            .map_err(|e| rejected("add_allocation", e))?;

        if self.position(&input.name).is_some() {
            return Err(rejected(
                "add_allocation",
                LedgerError::duplicate_category(&input.name),
            ));
        }

        let total = self.total_allocated().checked_add(input.amount);
        self.check_income_guard("add_allocation", total)?;

        debug!(category = %input.name, amount = %input.amount, kind = %input.kind, "allocation added");
        self.allocations.push(Allocation::from_input(input));
        Ok(())
    }

    /// Remove an allocation by name
    ///
    /// Transactions recorded against it stay in the log.
    pub fn remove_allocation(&mut self, name: &str) -> LedgerResult<Allocation> {
        let index = self.index_of("remove_allocation", name)?;
        let removed = self.allocations.remove(index);

        debug!(category = %removed.name, "allocation removed");
        Ok(removed)
    }

    /// Apply a partial update to an allocation
    ///
    /// Changing the amount re-runs the income guard against every other
    /// category and recomputes `remaining` from what has been spent so far,
    /// clamped at zero. Lowering an amount on an over-allocated ledger still
    /// fails while the new total exceeds income.
    pub fn update_allocation(
        &mut self,
        name: &str,
        update: AllocationUpdate,
    ) -> LedgerResult<Allocation> {
        const OP: &str = "update_allocation";

        let index = self.index_of(OP, name)?;
        let current = &self.allocations[index];

        if let Some(new_name) = &update.name {
            validate_name(new_name)
                .map_err(|e| rejected(OP, LedgerError::invalid_allocation(new_name, e.to_string())))?;

            if new_name != name && self.position(new_name).is_some() {
                return Err(rejected(OP, LedgerError::duplicate_category(new_name)));
            }
        }

        let new_amount = update.amount.unwrap_or(current.amount);
        if !new_amount.is_positive() {
            return Err(rejected(OP, LedgerError::InvalidAmount(new_amount)));
        }

        if new_amount != current.amount {
            let total = self
                .allocations
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != index)
                .try_fold(new_amount, |acc, (_, a)| acc.checked_add(a.amount));
            self.check_income_guard(OP, total)?;
        }

        let remaining = if new_amount != current.amount {
            new_amount.saturating_sub(current.spent()).max(Money::zero())
        } else {
            current.remaining
        };

        let updated = Allocation {
            name: update.name.unwrap_or_else(|| current.name.clone()),
            amount: new_amount,
            kind: update.kind.unwrap_or(current.kind),
            remaining,
        };

        debug!(category = %name, updated = %updated, "allocation updated");
        self.allocations[index] = updated.clone();
        Ok(updated)
    }

    /// Record an expense against a category
    ///
    /// Fails with `InsufficientFunds` when the amount exceeds the remaining
    /// balance, unless `allow_overspend` is set.
    pub fn record_expense(
        &mut self,
        category: &str,
        amount: Money,
        description: impl Into<String>,
        allow_overspend: bool,
    ) -> LedgerResult<TransactionId> {
        const OP: &str = "record_expense";

        if !amount.is_positive() {
            return Err(rejected(OP, LedgerError::InvalidAmount(amount)));
        }

        let index = self.index_of(OP, category)?;
        let allocation = &mut self.allocations[index];

        if amount > allocation.remaining && !allow_overspend {
            return Err(rejected(
                OP,
                LedgerError::InsufficientFunds {
                    category: category.to_string(),
                    needed: amount,
                    available: allocation.remaining,
                },
            ));
        }

        // only an override can drive the balance far enough to leave the i64 range
        let Some(remaining) = allocation.remaining.checked_sub(amount) else {
            return Err(rejected(OP, LedgerError::InvalidAmount(amount)));
        };

        if remaining.is_negative() {
            warn!(
                category,
                %amount,
                remaining = %allocation.remaining,
                "overspend override: category will go negative"
            );
        }

        allocation.remaining = remaining;

        let transaction = ExpenseTransaction::new(category, amount, description);
        let id = transaction.id;
        debug!(
            category,
            %amount,
            remaining = %allocation.remaining,
            transaction = %id.short(),
            "expense recorded"
        );
        self.transactions.push(transaction);
        Ok(id)
    }

    /// Record an expense, overriding the spend guard
    pub fn force_record_expense(
        &mut self,
        category: &str,
        amount: Money,
        description: impl Into<String>,
    ) -> LedgerResult<TransactionId> {
        self.record_expense(category, amount, description, true)
    }

    /// Remaining balance of one category
    pub fn remaining_amount(&self, name: &str) -> LedgerResult<Money> {
        self.allocation_ref(name).map(|a| a.remaining)
    }

    /// Owned copy of one allocation
    pub fn allocation(&self, name: &str) -> LedgerResult<Allocation> {
        self.allocation_ref(name).cloned()
    }

    /// Fresh summary of income, totals and every allocation
    pub fn budget_summary(&self) -> BudgetSummary {
        BudgetSummary::compute(self.income, &self.allocations)
    }

    /// Copy of the whole expense log, oldest first
    pub fn transactions(&self) -> Vec<ExpenseTransaction> {
        self.transactions.clone()
    }

    /// Copy of one transaction by id
    pub fn transaction(&self, id: TransactionId) -> Option<ExpenseTransaction> {
        self.transactions.iter().find(|t| t.id == id).cloned()
    }

    /// Number of transactions in the log
    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// Expenses recorded under a category name, oldest first
    ///
    /// Matches on the name stored in each transaction, so records of removed
    /// or renamed categories are still found by their old name.
    pub fn category_transactions(&self, name: &str) -> Vec<ExpenseTransaction> {
        self.transactions
            .iter()
            .filter(|t| t.category_name == name)
            .cloned()
            .collect()
    }

    /// Replace the income
    ///
    /// Under the lenient policy existing allocations are not re-checked, so
    /// the ledger may end up with more allocated than earned until the next
    /// allocation change.
    pub fn update_monthly_income(&mut self, new_income: Money) -> LedgerResult<()> {
        const OP: &str = "update_monthly_income";

        if !new_income.is_positive() {
            return Err(rejected(OP, LedgerError::InvalidAmount(new_income)));
        }

        let allocated = self.total_allocated();
        if allocated > new_income {
            match self.policy {
                IncomePolicy::Strict => {
                    return Err(rejected(
                        OP,
                        LedgerError::BudgetExceedsIncome {
                            allocated,
                            income: new_income,
                        },
                    ));
                }
                IncomePolicy::Lenient => {
                    warn!(%allocated, income = %new_income, "income lowered below allocated total");
                }
            }
        }

        info!(old = %self.income, new = %new_income, "income updated");
        self.income = new_income;
        Ok(())
    }

    /// Start a new period: refill every category and clear the log
    pub fn reset_budget(&mut self) {
        self.allocations.iter_mut().for_each(Allocation::refill);
        let cleared = self.transactions.len();
        self.transactions.clear();

        info!(cleared, "budget reset");
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.allocations.iter().position(|a| a.name == name)
    }

    fn index_of(&self, op: &'static str, name: &str) -> LedgerResult<usize> {
        self.position(name)
            .ok_or_else(|| rejected(op, LedgerError::category_not_found(name)))
    }

    fn allocation_ref(&self, name: &str) -> LedgerResult<&Allocation> {
        self.allocations
            .iter()
            .find(|a| a.name == name)
            .ok_or_else(|| LedgerError::category_not_found(name))
    }

    /// `None` means the total overflowed, which always exceeds income
    fn check_income_guard(&self, op: &'static str, allocated: Option<Money>) -> LedgerResult<Money> {
        match allocated {
            Some(total) if total <= self.income => Ok(total),
            total => Err(rejected(
                op,
                LedgerError::BudgetExceedsIncome {
                    allocated: total.unwrap_or(Money::from_cents(i64::MAX)),
                    income: self.income,
                },
            )),
        }
    }
}

fn rejected(op: &'static str, err: LedgerError) -> LedgerError {
    debug!(operation = op, error = %err, "ledger operation rejected");
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AllocationKind;

    fn dollars(d: i64) -> Money {
        Money::from_dollars(d)
    }

    fn input(name: &str, d: i64, kind: AllocationKind) -> AllocationInput {
        AllocationInput::new(name, dollars(d), kind)
    }

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new(dollars(5000)).unwrap();
        ledger
            .create_budget(vec![
                input("Groceries", 600, AllocationKind::Expense),
                input("EmergencyFund", 700, AllocationKind::Saving),
            ])
            .unwrap();
        ledger
    }

    #[test]
    fn test_new_rejects_non_positive_income() {
        assert_eq!(
            Ledger::new(Money::zero()),
            Err(LedgerError::InvalidAmount(Money::zero()))
        );
        assert!(Ledger::new(dollars(-1)).is_err());
        assert_eq!(Ledger::new(dollars(1)).unwrap().policy(), IncomePolicy::Lenient);
    }

    #[test]
    fn test_example_scenario() {
        let mut ledger = sample_ledger();

        ledger
            .record_expense("Groceries", Money::from_cents(12475), "Weekly shop", false)
            .unwrap();
        assert_eq!(ledger.remaining_amount("Groceries").unwrap(), Money::from_cents(47525));
        assert_eq!(ledger.budget_summary().total_remaining, Money::from_cents(117525));
        assert_eq!(ledger.transactions().len(), 1);

        let before = ledger.clone();
        let err = ledger
            .record_expense("Groceries", dollars(600), "too much", false)
            .unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientFunds { .. }));
        assert_eq!(ledger, before);

        ledger
            .force_record_expense("Groceries", dollars(600), "override")
            .unwrap();
        assert_eq!(ledger.remaining_amount("Groceries").unwrap(), Money::from_cents(-12475));
        assert_eq!(ledger.transactions().len(), 2);
    }

    #[test]
    fn test_create_budget_replaces_allocations_and_keeps_log() {
        let mut ledger = sample_ledger();
        ledger
            .record_expense("Groceries", dollars(10), "milk", false)
            .unwrap();

        ledger
            .create_budget(vec![input("Rent", 1500, AllocationKind::Bills)])
            .unwrap();

        let names: Vec<_> = ledger.allocations().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Rent"]);
        assert_eq!(ledger.remaining_amount("Rent").unwrap(), dollars(1500));
        assert_eq!(ledger.transactions().len(), 1);
    }

    #[test]
    fn test_create_budget_exactly_at_income() {
        let mut ledger = Ledger::new(dollars(1000)).unwrap();
        ledger
            .create_budget(vec![
                input("A", 400, AllocationKind::Expense),
                input("B", 600, AllocationKind::Bills),
            ])
            .unwrap();
        assert!(ledger.budget_summary().unallocated.is_zero());
    }

    #[test]
    fn test_create_budget_rejections() {
        let mut ledger = sample_ledger();
        let before = ledger.clone();

        let err = ledger
            .create_budget(vec![input("A", 3000, AllocationKind::Expense), input("B", 2001, AllocationKind::Expense)])
            .unwrap_err();
        assert!(matches!(err, LedgerError::BudgetExceedsIncome { .. }));

        let err = ledger
            .create_budget(vec![input("", 10, AllocationKind::Expense)])
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAllocation { .. }));

        let err = ledger
            .create_budget(vec![input("A", 0, AllocationKind::Expense)])
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAllocation { .. }));

        let err = ledger
            .create_budget(vec![input("A", 10, AllocationKind::Expense), input("A", 20, AllocationKind::Saving)])
            .unwrap_err();
        assert_eq!(err, LedgerError::duplicate_category("A"));

        assert_eq!(ledger, before);
    }

    #[test]
    fn test_add_allocation() {
        let mut ledger = sample_ledger();
        ledger
            .add_allocation(input("Rent", 1500, AllocationKind::Bills))
            .unwrap();

        let names: Vec<_> = ledger.allocations().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Groceries", "EmergencyFund", "Rent"]);
        assert_eq!(ledger.remaining_amount("Rent").unwrap(), dollars(1500));
    }

    #[test]
    fn test_add_allocation_rejections() {
        let mut ledger = sample_ledger();
        let before = ledger.clone();

        assert_eq!(
            ledger.add_allocation(input("Groceries", 1, AllocationKind::Expense)),
            Err(LedgerError::duplicate_category("Groceries"))
        );
        assert!(matches!(
            ledger.add_allocation(input("Travel", 3701, AllocationKind::Expense)),
            Err(LedgerError::BudgetExceedsIncome { .. })
        ));
        assert!(matches!(
            ledger.add_allocation(input("Travel", -5, AllocationKind::Expense)),
            Err(LedgerError::InvalidAllocation { .. })
        ));

        assert_eq!(ledger, before);
        ledger
            .add_allocation(input("Travel", 3700, AllocationKind::Expense))
            .unwrap();
    }

    #[test]
    fn test_remove_allocation_keeps_transactions() {
        let mut ledger = sample_ledger();
        ledger
            .record_expense("Groceries", dollars(50), "market", false)
            .unwrap();

        let removed = ledger.remove_allocation("Groceries").unwrap();
        assert_eq!(removed.remaining, dollars(550));
        assert!(ledger.remaining_amount("Groceries").unwrap_err().is_not_found());
        assert_eq!(ledger.category_transactions("Groceries").len(), 1);

        assert_eq!(
            ledger.remove_allocation("Groceries"),
            Err(LedgerError::category_not_found("Groceries"))
        );
    }

    #[test]
    fn test_update_amount_recomputes_remaining() {
        let mut ledger = sample_ledger();
        ledger
            .record_expense("Groceries", dollars(200), "shop", false)
            .unwrap();

        let updated = ledger
            .update_allocation("Groceries", AllocationUpdate::amount(dollars(800)))
            .unwrap();
        assert_eq!(updated.amount, dollars(800));
        assert_eq!(updated.remaining, dollars(600));

        // lowering the cap below spend clamps at zero
        let updated = ledger
            .update_allocation("Groceries", AllocationUpdate::amount(dollars(150)))
            .unwrap();
        assert_eq!(updated.remaining, Money::zero());
        assert_eq!(ledger.transactions().len(), 1);
    }

    #[test]
    fn test_update_rename_and_kind() {
        let mut ledger = sample_ledger();
        ledger
            .record_expense("Groceries", dollars(20), "bread", false)
            .unwrap();

        let update = AllocationUpdate {
            name: Some("Food".into()),
            kind: Some(AllocationKind::Bills),
            ..AllocationUpdate::default()
        };
        let updated = ledger.update_allocation("Groceries", update).unwrap();

        assert_eq!(updated.name, "Food");
        assert_eq!(updated.kind, AllocationKind::Bills);
        assert_eq!(updated.remaining, dollars(580));
        assert_eq!(ledger.allocations()[0].name, "Food");
        // the log keeps the old name
        assert_eq!(ledger.category_transactions("Groceries").len(), 1);
        assert!(ledger.category_transactions("Food").is_empty());
    }

    #[test]
    fn test_update_without_amount_keeps_negative_remaining() {
        let mut ledger = sample_ledger();
        ledger
            .force_record_expense("Groceries", dollars(700), "party")
            .unwrap();

        let updated = ledger
            .update_allocation("Groceries", AllocationUpdate::kind(AllocationKind::Saving))
            .unwrap();
        assert_eq!(updated.remaining, dollars(-100));
    }

    #[test]
    fn test_update_rejections() {
        let mut ledger = sample_ledger();
        let before = ledger.clone();

        assert!(ledger
            .update_allocation("Nope", AllocationUpdate::amount(dollars(1)))
            .unwrap_err()
            .is_not_found());
        assert!(matches!(
            ledger.update_allocation("Groceries", AllocationUpdate::amount(dollars(4301))),
            Err(LedgerError::BudgetExceedsIncome { .. })
        ));
        assert_eq!(
            ledger.update_allocation("Groceries", AllocationUpdate::amount(Money::zero())),
            Err(LedgerError::InvalidAmount(Money::zero()))
        );
        assert_eq!(
            ledger.update_allocation("Groceries", AllocationUpdate::rename("EmergencyFund")),
            Err(LedgerError::duplicate_category("EmergencyFund"))
        );
        assert!(matches!(
            ledger.update_allocation("Groceries", AllocationUpdate::rename(" ")),
            Err(LedgerError::InvalidAllocation { .. })
        ));

        assert_eq!(ledger, before);

        // renaming to its own name is a no-op, not a collision
        ledger
            .update_allocation("Groceries", AllocationUpdate::rename("Groceries"))
            .unwrap();
        ledger
            .update_allocation("Groceries", AllocationUpdate::amount(dollars(4300)))
            .unwrap();
    }

    #[test]
    fn test_update_lowering_amount_still_checks_income() {
        let mut ledger = sample_ledger();
        ledger.update_monthly_income(dollars(1000)).unwrap();
        let before = ledger.clone();

        assert_eq!(
            ledger.update_allocation("Groceries", AllocationUpdate::amount(dollars(500))),
            Err(LedgerError::BudgetExceedsIncome {
                allocated: dollars(1200),
                income: dollars(1000),
            })
        );
        assert_eq!(ledger, before);

        // non-amount changes are not blocked by the over-allocation
        ledger
            .update_allocation("Groceries", AllocationUpdate::kind(AllocationKind::Bills))
            .unwrap();

        let updated = ledger
            .update_allocation("Groceries", AllocationUpdate::amount(dollars(300)))
            .unwrap();
        assert_eq!(updated.amount, dollars(300));
        assert_eq!(ledger.total_allocated(), dollars(1000));
    }

    #[test]
    fn test_overflowing_total_exceeds_any_income() {
        let max = Money::from_cents(i64::MAX);
        let mut ledger = Ledger::new(max).unwrap();
        ledger
            .add_allocation(AllocationInput::new("Everything", max, AllocationKind::Saving))
            .unwrap();
        let before = ledger.clone();

        assert!(matches!(
            ledger.add_allocation(input("More", 1, AllocationKind::Expense)),
            Err(LedgerError::BudgetExceedsIncome { .. })
        ));
        assert!(matches!(
            ledger.create_budget(vec![
                AllocationInput::new("A", max, AllocationKind::Expense),
                input("B", 1, AllocationKind::Expense),
            ]),
            Err(LedgerError::BudgetExceedsIncome { .. })
        ));
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_forced_expense_overflow_is_rejected() {
        let mut ledger = sample_ledger();
        let huge = Money::from_cents(i64::MAX);

        ledger.force_record_expense("Groceries", huge, "first").unwrap();
        let before = ledger.clone();

        assert_eq!(
            ledger.force_record_expense("Groceries", huge, "second"),
            Err(LedgerError::InvalidAmount(huge))
        );
        assert_eq!(ledger, before);

        // reads stay usable at the extremes
        let summary = ledger.budget_summary();
        assert!(summary.total_remaining.is_negative());
        assert_eq!(summary.allocations[0].spent(), Money::from_cents(i64::MAX));
        assert!(summary.total_spent().is_positive());
        let _ = crate::display::format_budget_summary(&summary, "$");
    }

    #[test]
    fn test_record_expense_rejections() {
        let mut ledger = sample_ledger();
        let before = ledger.clone();

        assert_eq!(
            ledger.record_expense("Groceries", Money::zero(), "nothing", false),
            Err(LedgerError::InvalidAmount(Money::zero()))
        );
        assert!(ledger
            .record_expense("Nope", dollars(1), "x", true)
            .unwrap_err()
            .is_not_found());
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_spend_exact_remaining() {
        let mut ledger = sample_ledger();
        ledger
            .record_expense("Groceries", dollars(600), "all of it", false)
            .unwrap();
        assert!(ledger.remaining_amount("Groceries").unwrap().is_zero());
        assert!(ledger
            .record_expense("Groceries", Money::from_cents(1), "one cent", false)
            .is_err());
    }

    #[test]
    fn test_summary_is_a_copy() {
        let ledger = sample_ledger();
        let mut summary = ledger.budget_summary();
        summary.allocations[0].remaining = dollars(-999);
        summary.allocations.clear();

        assert_eq!(ledger.budget_summary().allocations.len(), 2);
        assert_eq!(ledger.remaining_amount("Groceries").unwrap(), dollars(600));
        assert_eq!(ledger.budget_summary(), ledger.budget_summary());
    }

    #[test]
    fn test_update_income_lenient() {
        let mut ledger = sample_ledger();
        ledger.update_monthly_income(dollars(1000)).unwrap();

        let summary = ledger.budget_summary();
        assert_eq!(summary.total_income, dollars(1000));
        assert_eq!(summary.unallocated, dollars(-300));

        assert_eq!(
            ledger.update_monthly_income(Money::zero()),
            Err(LedgerError::InvalidAmount(Money::zero()))
        );
    }

    #[test]
    fn test_update_income_strict() {
        let mut ledger = Ledger::with_policy(dollars(5000), IncomePolicy::Strict).unwrap();
        ledger
            .create_budget(vec![input("Rent", 1500, AllocationKind::Bills)])
            .unwrap();

        assert!(matches!(
            ledger.update_monthly_income(dollars(1000)),
            Err(LedgerError::BudgetExceedsIncome { .. })
        ));
        assert_eq!(ledger.income(), dollars(5000));

        ledger.update_monthly_income(dollars(1500)).unwrap();
        assert_eq!(ledger.income(), dollars(1500));
    }

    #[test]
    fn test_reset_budget() {
        let mut ledger = sample_ledger();
        ledger
            .record_expense("Groceries", dollars(100), "a", false)
            .unwrap();
        ledger
            .force_record_expense("EmergencyFund", dollars(900), "b")
            .unwrap();

        ledger.reset_budget();

        assert!(ledger.transactions().is_empty());
        for allocation in ledger.allocations() {
            assert_eq!(allocation.remaining, allocation.amount);
        }
    }

    #[test]
    fn test_transaction_lookup() {
        let mut ledger = sample_ledger();
        let id = ledger
            .record_expense("Groceries", dollars(12), "eggs", false)
            .unwrap();

        let txn = ledger.transaction(id).unwrap();
        assert_eq!(txn.category_name, "Groceries");
        assert_eq!(txn.amount, dollars(12));
        assert_eq!(ledger.transaction_count(), 1);
        assert!(ledger.transaction(TransactionId::new()).is_none());
    }

    #[test]
    fn test_income_policy_parse() {
        assert_eq!("Strict".parse::<IncomePolicy>(), Ok(IncomePolicy::Strict));
        assert_eq!("lenient".parse::<IncomePolicy>(), Ok(IncomePolicy::Lenient));
        assert!("loose".parse::<IncomePolicy>().is_err());
    }
}
