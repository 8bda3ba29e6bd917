use envelope_ledger::models::{AllocationInput, AllocationKind, AllocationUpdate, Money};
use envelope_ledger::{IncomePolicy, Ledger, LedgerError};
use proptest::prelude::*;

const CATEGORIES: [&str; 3] = ["Groceries", "Rent", "Fun"];

fn seeded_ledger() -> Ledger {
    let mut ledger = Ledger::new(Money::from_dollars(5000)).unwrap();
    ledger
        .create_budget(vec![
            AllocationInput::new(CATEGORIES[0], Money::from_dollars(600), AllocationKind::Expense),
            AllocationInput::new(CATEGORIES[1], Money::from_dollars(1500), AllocationKind::Bills),
            AllocationInput::new(CATEGORIES[2], Money::from_cents(25_050), AllocationKind::Saving),
        ])
        .unwrap();
    ledger
}

#[derive(Debug, Clone)]
enum Op {
    Expense { category: usize, cents: i64, overspend: bool },
    Add { cents: i64 },
    Update { category: usize, cents: i64 },
    Remove { category: usize },
    Income { cents: i64 },
}

/// Mostly everyday amounts, occasionally the extremes of the cent range
fn cents(everyday: std::ops::Range<i64>) -> impl Strategy<Value = i64> {
    prop_oneof![
        12 => everyday,
        1 => Just(i64::MAX),
        1 => Just(i64::MAX - 1),
        1 => Just(i64::MIN),
        1 => (i64::MAX / 2)..i64::MAX,
    ]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (0..4usize, cents(-500..40_000), any::<bool>())
            .prop_map(|(category, cents, overspend)| Op::Expense { category, cents, overspend }),
        1 => cents(-100..400_000).prop_map(|cents| Op::Add { cents }),
        1 => (0..4usize, cents(-100..400_000)).prop_map(|(category, cents)| Op::Update { category, cents }),
        1 => (0..4usize).prop_map(|category| Op::Remove { category }),
        1 => cents(-100..800_000).prop_map(|cents| Op::Income { cents }),
    ]
}

fn name(index: usize) -> &'static str {
    CATEGORIES.get(index).copied().unwrap_or("Missing")
}

fn apply(ledger: &mut Ledger, op: &Op, extra: &mut usize) -> Result<(), LedgerError> {
    match op {
        Op::Expense { category, cents, overspend } => ledger
            .record_expense(name(*category), Money::from_cents(*cents), "", *overspend)
            .map(|_| ()),
        Op::Add { cents } => {
            *extra += 1;
            ledger.add_allocation(AllocationInput::new(
                format!("Extra {}", extra),
                Money::from_cents(*cents),
                AllocationKind::Expense,
            ))
        }
        Op::Update { category, cents } => ledger
            .update_allocation(name(*category), AllocationUpdate::amount(Money::from_cents(*cents)))
            .map(|_| ()),
        Op::Remove { category } => ledger.remove_allocation(name(*category)).map(|_| ()),
        Op::Income { cents } => ledger.update_monthly_income(Money::from_cents(*cents)),
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

    /// Every category's spend equals the sum of its recorded expenses, in
    /// exact cents, over long expense sequences.
    #[test]
    fn expenses_are_conserved(
        ops in prop::collection::vec((0..3usize, 1i64..20_000, any::<bool>()), 0..200)
    ) {
        let mut ledger = seeded_ledger();

        for (category, cents, overspend) in &ops {
            let _ = ledger.record_expense(name(*category), Money::from_cents(*cents), "", *overspend);
        }

        for allocation in ledger.allocations() {
            let logged: Money = ledger
                .category_transactions(&allocation.name)
                .iter()
                .map(|t| t.amount)
                .sum();
            prop_assert_eq!(allocation.spent(), logged);
        }

        let summary = ledger.budget_summary();
        let logged_total: Money = ledger.transactions().iter().map(|t| t.amount).sum();
        prop_assert_eq!(summary.total_spent(), logged_total);
        prop_assert_eq!(summary.total_remaining, summary.total_allocated - logged_total);
    }

    /// Without the override no category goes negative.
    #[test]
    fn spend_guard_holds_without_override(
        ops in prop::collection::vec((0..3usize, 1i64..50_000), 0..100)
    ) {
        let mut ledger = seeded_ledger();

        for (category, cents) in &ops {
            let before = ledger.remaining_amount(name(*category)).unwrap();
            match ledger.record_expense(name(*category), Money::from_cents(*cents), "", false) {
                Ok(_) => prop_assert!(Money::from_cents(*cents) <= before),
                Err(LedgerError::InsufficientFunds { available, .. }) => {
                    prop_assert_eq!(available, before);
                    prop_assert!(Money::from_cents(*cents) > before);
                }
                Err(other) => prop_assert!(false, "unexpected error: {}", other),
            }
        }

        prop_assert!(ledger.allocations().iter().all(|a| !a.remaining.is_negative()));
    }

    /// A rejected operation leaves the ledger exactly as it was.
    #[test]
    fn rejected_operations_change_nothing(ops in prop::collection::vec(op_strategy(), 0..80)) {
        let mut ledger = seeded_ledger();
        let mut extra = 0;

        for op in &ops {
            let before = ledger.clone();
            if apply(&mut ledger, op, &mut extra).is_err() {
                prop_assert_eq!(&ledger, &before);
            }
        }
    }

    /// Any sequence of operations, extreme amounts included, runs without
    /// panicking and leaves summaries readable.
    #[test]
    fn extreme_amounts_never_panic(ops in prop::collection::vec(op_strategy(), 0..80)) {
        let mut ledger = seeded_ledger();
        let mut extra = 0;

        for op in &ops {
            let _ = apply(&mut ledger, op, &mut extra);
            let summary = ledger.budget_summary();
            prop_assert_eq!(summary.total_allocated, ledger.total_allocated());
            let _ = summary.total_spent();
            let _ = summary.to_string();
        }
    }

    /// Allocation changes never push the total above income.
    #[test]
    fn income_guard_holds_under_strict_policy(ops in prop::collection::vec(op_strategy(), 0..80)) {
        let mut ledger = Ledger::with_policy(Money::from_dollars(5000), IncomePolicy::Strict).unwrap();
        ledger
            .create_budget(vec![AllocationInput::new(
                CATEGORIES[0],
                Money::from_dollars(600),
                AllocationKind::Expense,
            )])
            .unwrap();
        let mut extra = 0;

        for op in &ops {
            let _ = apply(&mut ledger, op, &mut extra);
            prop_assert!(ledger.total_allocated() <= ledger.income());
        }
    }

    /// Reset restores every ceiling and empties the log.
    #[test]
    fn reset_refills_everything(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let mut ledger = seeded_ledger();
        let mut extra = 0;
        for op in &ops {
            let _ = apply(&mut ledger, op, &mut extra);
        }
        let allocated = ledger.total_allocated();

        ledger.reset_budget();

        prop_assert!(ledger.transactions().is_empty());
        prop_assert!(ledger.allocations().iter().all(|a| a.remaining == a.amount));
        prop_assert_eq!(ledger.budget_summary().total_remaining, allocated);
    }

    /// Reads do not change state.
    #[test]
    fn reads_are_idempotent(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut ledger = seeded_ledger();
        let mut extra = 0;
        for op in &ops {
            let _ = apply(&mut ledger, op, &mut extra);
        }

        let snapshot = ledger.clone();
        let first = ledger.budget_summary();
        let _ = ledger.transactions();
        let _ = ledger.remaining_amount(CATEGORIES[0]);
        prop_assert_eq!(ledger.budget_summary(), first);
        prop_assert_eq!(&ledger, &snapshot);
    }
}

#[test]
fn example_scenario() {
    let mut ledger = Ledger::new(Money::from_dollars(5000)).unwrap();
    ledger
        .create_budget(vec![
            AllocationInput::new("Groceries", Money::from_dollars(600), AllocationKind::Expense),
            AllocationInput::new("EmergencyFund", Money::from_dollars(700), AllocationKind::Saving),
        ])
        .unwrap();

    ledger
        .record_expense("Groceries", Money::from_cents(12475), "Weekly shop", false)
        .unwrap();
    assert_eq!(ledger.remaining_amount("Groceries").unwrap(), Money::from_cents(47525));
    assert_eq!(ledger.budget_summary().total_remaining, Money::from_cents(117525));

    let err = ledger
        .record_expense("Groceries", Money::from_dollars(600), "Too much", false)
        .unwrap_err();
    assert_eq!(
        err,
        LedgerError::InsufficientFunds {
            category: "Groceries".into(),
            needed: Money::from_dollars(600),
            available: Money::from_cents(47525),
        }
    );

    ledger
        .force_record_expense("Groceries", Money::from_dollars(600), "Override")
        .unwrap();
    assert_eq!(ledger.remaining_amount("Groceries").unwrap(), Money::from_cents(-12475));
    assert_eq!(ledger.transactions().len(), 2);
}

#[test]
fn lowering_an_amount_while_over_allocated_is_rejected() {
    let mut ledger = Ledger::new(Money::from_dollars(5000)).unwrap();
    ledger
        .create_budget(vec![
            AllocationInput::new("Groceries", Money::from_dollars(600), AllocationKind::Expense),
            AllocationInput::new("EmergencyFund", Money::from_dollars(700), AllocationKind::Saving),
        ])
        .unwrap();
    ledger.update_monthly_income(Money::from_dollars(1000)).unwrap();
    let before = ledger.clone();

    let err = ledger
        .update_allocation("Groceries", AllocationUpdate::amount(Money::from_dollars(500)))
        .unwrap_err();

    assert!(matches!(err, LedgerError::BudgetExceedsIncome { .. }));
    assert_eq!(ledger, before);
}

#[test]
fn repeated_forced_expenses_at_the_bound_are_rejected() {
    let mut ledger = seeded_ledger();
    let huge = Money::from_cents(i64::MAX);

    ledger.force_record_expense("Groceries", huge, "first").unwrap();
    let before = ledger.clone();

    assert_eq!(
        ledger.force_record_expense("Groceries", huge, "second"),
        Err(LedgerError::InvalidAmount(huge))
    );
    assert_eq!(ledger, before);
    assert_eq!(ledger.transaction_count(), 1);
}
