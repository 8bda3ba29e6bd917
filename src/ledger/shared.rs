//! Thread-safe ledger handle
//!
//! The income and spend guards are check-then-act sequences, so the whole
//! ledger sits behind one mutex and every operation holds it for its full
//! duration.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    Allocation, AllocationInput, AllocationUpdate, BudgetSummary, ExpenseTransaction, Money,
    TransactionId,
};

use super::Ledger;

/// Cloneable handle to a ledger shared between threads
#[derive(Debug, Clone)]
pub struct SharedLedger {
    inner: Arc<Mutex<Ledger>>,
}

impl SharedLedger {
    /// Wrap an existing ledger
    pub fn new(ledger: Ledger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    fn lock(&self) -> LedgerResult<MutexGuard<'_, Ledger>> {
        self.inner.lock().map_err(|_| LedgerError::Poisoned)
    }

    /// Run a closure with exclusive access to the ledger
    pub fn with<T>(&self, f: impl FnOnce(&mut Ledger) -> T) -> LedgerResult<T> {
        let mut guard = self.lock()?;
        Ok(f(&mut guard))
    }

    /// Replace the allocation set under the lock
    pub fn create_budget(&self, inputs: Vec<AllocationInput>) -> LedgerResult<()> {
        self.lock()?.create_budget(inputs)
    }

    /// Append one allocation
    pub fn add_allocation(&self, input: AllocationInput) -> LedgerResult<()> {
        self.lock()?.add_allocation(input)
    }

    /// Remove an allocation by name
    pub fn remove_allocation(&self, name: &str) -> LedgerResult<Allocation> {
        self.lock()?.remove_allocation(name)
    }

    /// Apply a partial update to an allocation
    pub fn update_allocation(
        &self,
        name: &str,
        update: AllocationUpdate,
    ) -> LedgerResult<Allocation> {
        self.lock()?.update_allocation(name, update)
    }

    /// Record an expense; check and decrement happen under one lock
    pub fn record_expense(
        &self,
        category: &str,
        amount: Money,
        description: impl Into<String>,
        allow_overspend: bool,
    ) -> LedgerResult<TransactionId> {
        self.lock()?
            .record_expense(category, amount, description, allow_overspend)
    }

    /// Record an expense, overriding the spend guard
    pub fn force_record_expense(
        &self,
        category: &str,
        amount: Money,
        description: impl Into<String>,
    ) -> LedgerResult<TransactionId> {
        self.lock()?.force_record_expense(category, amount, description)
    }

    /// Remaining balance of one category
    pub fn remaining_amount(&self, name: &str) -> LedgerResult<Money> {
        self.lock()?.remaining_amount(name)
    }

    /// Fresh summary of the current state
    pub fn budget_summary(&self) -> LedgerResult<BudgetSummary> {
        Ok(self.lock()?.budget_summary())
    }

    /// Copy of the expense log
    pub fn transactions(&self) -> LedgerResult<Vec<ExpenseTransaction>> {
        Ok(self.lock()?.transactions())
    }

    /// Expenses recorded under a category name
    pub fn category_transactions(&self, name: &str) -> LedgerResult<Vec<ExpenseTransaction>> {
        Ok(self.lock()?.category_transactions(name))
    }

    /// Replace the income, following the ledger's income policy
    pub fn update_monthly_income(&self, new_income: Money) -> LedgerResult<()> {
        self.lock()?.update_monthly_income(new_income)
    }

    /// Refill every category and clear the log
    pub fn reset_budget(&self) -> LedgerResult<()> {
        self.lock()?.reset_budget();
        Ok(())
    }

    /// Owned copy of the current ledger state
    pub fn snapshot(&self) -> LedgerResult<Ledger> {
        Ok(self.lock()?.clone())
    }
}

impl From<Ledger> for SharedLedger {
    fn from(ledger: Ledger) -> Self {
        Self::new(ledger)
    }
}
