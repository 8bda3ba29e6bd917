//! Budget plans
//!
//! A budget plan is a scripted ledger session: an income, the initial
//! budget, and an ordered list of operations to apply. Plans are written in
//! YAML or JSON and replayed against a fresh [`Ledger`](crate::ledger::Ledger).
//!
//! ```yaml
//! income: 5000
//! allocations:
//!   - { name: Groceries, amount: 600, type: EXPENSE }
//!   - { name: EmergencyFund, amount: 700, type: SAVING }
//! steps:
//!   - { op: expense, category: Groceries, amount: "124.75", description: Weekly shop }
//!   - { op: force_expense, category: Groceries, amount: 600, description: override }
//!   - { op: reset }
//! ```
//!
//! Amounts in plans are written in currency units (`600`, `"124.75"`,
//! `"$1,200.00"`), not cents.

mod replay;

pub use replay::{replay, ReplayOptions, ReplayReport, StepOutcome, StepStatus};

use std::fmt;
use std::path::Path;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{LedgerError, LedgerResult};
use crate::ledger::IncomePolicy;
use crate::models::{AllocationInput, AllocationKind, AllocationUpdate, Money};

/// A monetary amount as written in a plan file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanAmount(pub Money);

impl From<PlanAmount> for Money {
    fn from(amount: PlanAmount) -> Self {
        amount.0
    }
}

impl From<Money> for PlanAmount {
    fn from(money: Money) -> Self {
        Self(money)
    }
}

impl Serialize for PlanAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_decimal_string())
    }
}

impl<'de> Deserialize<'de> for PlanAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PlanAmountVisitor)
    }
}

struct PlanAmountVisitor;

impl<'de> Visitor<'de> for PlanAmountVisitor {
    type Value = PlanAmount;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an amount such as 600, 124.75 or \"$1,200.00\"")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Money::parse(v).map(PlanAmount).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        v.checked_mul(100)
            .map(|cents| PlanAmount(Money::from_cents(cents)))
            .ok_or_else(|| E::custom(format!("amount out of range: {}", v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        let v = i64::try_from(v).map_err(|_| E::custom(format!("amount out of range: {}", v)))?;
        self.visit_i64(v)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        if !v.is_finite() {
            return Err(E::custom(format!("amount is not a number: {}", v)));
        }
        self.visit_str(&format!("{:.2}", v))
    }
}

/// One category of the initial budget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanAllocation {
    pub name: String,
    pub amount: PlanAmount,
    #[serde(default, rename = "type", alias = "kind")]
    pub kind: AllocationKind,
}

impl From<&PlanAllocation> for AllocationInput {
    fn from(allocation: &PlanAllocation) -> Self {
        AllocationInput::new(allocation.name.clone(), allocation.amount.into(), allocation.kind)
    }
}

/// One ledger operation in a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Record an expense, optionally overriding the spend guard
    Expense {
        category: String,
        amount: PlanAmount,
        #[serde(default)]
        description: String,
        #[serde(default)]
        allow_overspend: bool,
    },
    /// Record an expense with the spend guard overridden
    ForceExpense {
        category: String,
        amount: PlanAmount,
        #[serde(default)]
        description: String,
    },
    AddAllocation {
        name: String,
        amount: PlanAmount,
        #[serde(default, rename = "type", alias = "kind")]
        kind: AllocationKind,
    },
    RemoveAllocation {
        name: String,
    },
    UpdateAllocation {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        new_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        amount: Option<PlanAmount>,
        #[serde(default, rename = "type", alias = "kind", skip_serializing_if = "Option::is_none")]
        kind: Option<AllocationKind>,
    },
    SetIncome {
        amount: PlanAmount,
    },
    Reset,
}

impl Step {
    /// The `AllocationUpdate` carried by an `update_allocation` step
    pub fn allocation_update(&self) -> Option<AllocationUpdate> {
        match self {
            Step::UpdateAllocation {
                new_name,
                amount,
                kind,
                ..
            } => Some(AllocationUpdate {
                name: new_name.clone(),
                amount: amount.map(Money::from),
                kind: *kind,
            }),
            _ => None,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Expense {
                category,
                amount,
                allow_overspend,
                ..
            } => {
                write!(f, "expense {} from {}", amount.0, category)?;
                if *allow_overspend {
                    write!(f, " (overspend allowed)")?;
                }
                Ok(())
            }
            Step::ForceExpense { category, amount, .. } => {
                write!(f, "force expense {} from {}", amount.0, category)
            }
            Step::AddAllocation { name, amount, kind } => {
                write!(f, "add {} {} ({})", name, amount.0, kind)
            }
            Step::RemoveAllocation { name } => write!(f, "remove {}", name),
            Step::UpdateAllocation {
                name,
                new_name,
                amount,
                kind,
            } => {
                write!(f, "update {}", name)?;
                if let Some(new_name) = new_name {
                    write!(f, " name={}", new_name)?;
                }
                if let Some(amount) = amount {
                    write!(f, " amount={}", amount.0)?;
                }
                if let Some(kind) = kind {
                    write!(f, " type={}", kind)?;
                }
                Ok(())
            }
            Step::SetIncome { amount } => write!(f, "set income {}", amount.0),
            Step::Reset => write!(f, "reset budget"),
        }
    }
}

/// A scripted ledger session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetPlan {
    /// Income for the period
    pub income: PlanAmount,

    /// Overrides the configured income policy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<IncomePolicy>,

    /// Initial budget, applied with `create_budget`
    #[serde(default)]
    pub allocations: Vec<PlanAllocation>,

    /// Operations applied in order after the initial budget
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl BudgetPlan {
    /// Parse a plan from YAML
    pub fn from_yaml_str(source: &str) -> LedgerResult<Self> {
        serde_yaml::from_str(source).map_err(|e| LedgerError::Plan(e.to_string()))
    }

    /// Parse a plan from JSON
    pub fn from_json_str(source: &str) -> LedgerResult<Self> {
        serde_json::from_str(source).map_err(|e| LedgerError::Plan(e.to_string()))
    }

    /// Load a plan file; `.json` files are read as JSON, anything else as YAML
    pub fn from_path(path: impl AsRef<Path>) -> LedgerResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| LedgerError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let plan = if is_json {
            Self::from_json_str(&source)
        } else {
            Self::from_yaml_str(&source)
        };
        plan.map_err(|e| match e {
            LedgerError::Plan(msg) => LedgerError::Plan(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    /// The initial budget as ledger input
    pub fn allocation_inputs(&self) -> Vec<AllocationInput> {
        self.allocations.iter().map(AllocationInput::from).collect()
    }
}
