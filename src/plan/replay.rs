//! Replays a budget plan against a fresh ledger
//!
//! Setup (income and the initial budget) must succeed; a failure there is
//! returned as an error. Each step afterwards is applied in order and its
//! outcome recorded. A rejected step leaves the ledger unchanged and the
//! replay carries on, unless `stop_on_rejection` is set.

use serde::{Serialize, Serializer};
use tracing::{debug, info};

use crate::audit::{AuditEntry, EntityType};
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::{IncomePolicy, Ledger};
use crate::models::{Allocation, AllocationInput, Money};

use super::{BudgetPlan, Step};

/// Knobs for [`replay`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayOptions {
    /// Stop at the first rejected step
    pub stop_on_rejection: bool,
    /// Income policy used when the plan does not name one
    pub policy: IncomePolicy,
}

/// What happened to one step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum StepStatus {
    Applied {
        detail: String,
    },
    Rejected {
        #[serde(serialize_with = "serialize_error")]
        error: LedgerError,
    },
}

fn serialize_error<S: Serializer>(error: &LedgerError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

/// Outcome of one plan step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepOutcome {
    /// 1-based position in the plan
    pub index: usize,
    pub description: String,
    #[serde(flatten)]
    pub status: StepStatus,
}

impl StepOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self.status, StepStatus::Applied { .. })
    }

    pub fn error(&self) -> Option<&LedgerError> {
        match &self.status {
            StepStatus::Rejected { error } => Some(error),
            StepStatus::Applied { .. } => None,
        }
    }
}

/// Result of replaying a plan
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    /// Ledger state after the last step
    pub ledger: Ledger,
    pub outcomes: Vec<StepOutcome>,
    /// Audit entries for every mutation that was applied, setup included
    #[serde(skip)]
    pub audit: Vec<AuditEntry>,
    /// True when the replay stopped early on a rejection
    pub halted: bool,
}

impl ReplayReport {
    pub fn applied_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_applied()).count()
    }

    pub fn rejected_count(&self) -> usize {
        self.outcomes.len() - self.applied_count()
    }

    /// Rejected steps, in plan order
    pub fn rejections(&self) -> impl Iterator<Item = &StepOutcome> {
        self.outcomes.iter().filter(|o| !o.is_applied())
    }
}

/// Build a ledger from `plan` and apply its steps
pub fn replay(plan: &BudgetPlan, options: &ReplayOptions) -> LedgerResult<ReplayReport> {
    let policy = plan.policy.unwrap_or(options.policy);
    let income = Money::from(plan.income);

    let mut ledger = Ledger::with_policy(income, policy)?;
    let mut audit = vec![AuditEntry::create(
        EntityType::Income,
        "income",
        None,
        &income,
    )];

    let inputs = plan.allocation_inputs();
    ledger.create_budget(inputs)?;
    audit.extend(
        ledger
            .allocations()
            .iter()
            .map(|a| AuditEntry::create(EntityType::Allocation, &a.name, Some(a.kind.to_string()), a)),
    );

    info!(
        %income,
        ?policy,
        allocations = ledger.allocations().len(),
        steps = plan.steps.len(),
        "replaying plan"
    );

    let mut outcomes = Vec::with_capacity(plan.steps.len());
    let mut halted = false;

    for (i, step) in plan.steps.iter().enumerate() {
        let status = match apply_step(&mut ledger, step, &mut audit) {
            Ok(detail) => StepStatus::Applied { detail },
            Err(error) => StepStatus::Rejected { error },
        };

        let outcome = StepOutcome {
            index: i + 1,
            description: step.to_string(),
            status,
        };
        debug!(step = outcome.index, description = %outcome.description, applied = outcome.is_applied(), "step replayed");

        let stop = !outcome.is_applied() && options.stop_on_rejection;
        outcomes.push(outcome);
        if stop {
            halted = plan.steps.len() > i + 1;
            break;
        }
    }

    let report = ReplayReport {
        ledger,
        outcomes,
        audit,
        halted,
    };
    info!(
        applied = report.applied_count(),
        rejected = report.rejected_count(),
        halted = report.halted,
        "replay finished"
    );
    Ok(report)
}

fn apply_step(ledger: &mut Ledger, step: &Step, audit: &mut Vec<AuditEntry>) -> LedgerResult<String> {
    match step {
        Step::Expense {
            category,
            amount,
            description,
            allow_overspend,
        } => record(ledger, audit, category, (*amount).into(), description, *allow_overspend),
        Step::ForceExpense {
            category,
            amount,
            description,
        } => record(ledger, audit, category, (*amount).into(), description, true),
        Step::AddAllocation { name, amount, kind } => {
            ledger.add_allocation(AllocationInput::new(name.clone(), (*amount).into(), *kind))?;
            let added = ledger.allocation(name)?;
            audit.push(AuditEntry::create(
                EntityType::Allocation,
                &added.name,
                Some(added.kind.to_string()),
                &added,
            ));
            Ok(format!("unallocated {}", ledger.budget_summary().unallocated))
        }
        Step::RemoveAllocation { name } => {
            let removed = ledger.remove_allocation(name)?;
            audit.push(AuditEntry::delete(
                EntityType::Allocation,
                &removed.name,
                Some(removed.kind.to_string()),
                &removed,
            ));
            Ok(format!("released {}", removed.amount))
        }
        Step::UpdateAllocation { name, .. } => {
            let before = ledger.allocation(name)?;
            let update = step.allocation_update().unwrap_or_default();
            let after = ledger.update_allocation(name, update)?;
            audit.push(AuditEntry::update(
                EntityType::Allocation,
                name.as_str(),
                Some(after.name.clone()),
                &before,
                &after,
            ));
            Ok(describe_allocation(&after))
        }
        Step::SetIncome { amount } => {
            let before = ledger.income();
            ledger.update_monthly_income((*amount).into())?;
            let after = ledger.income();
            audit.push(AuditEntry::update(EntityType::Income, "income", None, &before, &after));

            let summary = ledger.budget_summary();
            if summary.unallocated.is_negative() {
                Ok(format!("over-allocated by {}", -summary.unallocated))
            } else {
                Ok(format!("unallocated {}", summary.unallocated))
            }
        }
        Step::Reset => {
            let cleared = ledger.transaction_count();
            ledger.reset_budget();
            audit.push(AuditEntry::reset(cleared));
            Ok(format!("cleared {} transactions", cleared))
        }
    }
}

fn record(
    ledger: &mut Ledger,
    audit: &mut Vec<AuditEntry>,
    category: &str,
    amount: Money,
    description: &str,
    allow_overspend: bool,
) -> LedgerResult<String> {
    let overspend = ledger.remaining_amount(category).is_ok_and(|r| amount > r);
    let id = ledger.record_expense(category, amount, description, allow_overspend)?;

    if let Some(transaction) = ledger.transaction(id) {
        let note = overspend.then(|| "overspend override".to_string());
        audit.push(AuditEntry::record(id.short(), category, &transaction, note));
    }

    let remaining = ledger.remaining_amount(category)?;
    Ok(format!("{} remaining {}", category, remaining))
}

fn describe_allocation(allocation: &Allocation) -> String {
    format!(
        "{} amount {} remaining {}",
        allocation.name, allocation.amount, allocation.remaining
    )
}
