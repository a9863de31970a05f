//! Property-based tests for the constraint engine.
//!
//! Covers identity checks on consistent statements, per-entity signal
//! uniqueness and ordering, and parallel/sequential equivalence.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::engine::ConstraintEngine;
use super::signal::SignalType;
use crate::statements::{AmountLine, BalanceSheetLine, EntityStatements, StatementModel};
use crate::tolerance::{Tolerance, within_tolerance};

/// Strategy for amounts from -10,000,000.00 to 10,000,000.00.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (-1_000_000_000i64..1_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for an optional amount, absent one time in four.
fn arb_optional_amount() -> impl Strategy<Value = Option<Decimal>> {
    prop_oneof![1 => Just(None), 3 => arb_amount().prop_map(Some)]
}

fn amount_line(amount: Option<Decimal>) -> AmountLine {
    AmountLine { amount }
}

fn closing_line(closing: Option<Decimal>) -> BalanceSheetLine {
    BalanceSheetLine {
        closing,
        ..BalanceSheetLine::default()
    }
}

/// Strategy for an entity touching every line the checks read.
fn arb_entity(id: usize) -> impl Strategy<Value = EntityStatements> {
    (
        proptest::collection::vec(arb_optional_amount(), 4),
        proptest::collection::vec(arb_optional_amount(), 6),
        proptest::collection::vec(arb_optional_amount(), 2),
    )
        .prop_map(move |(bs, eq, is)| {
            let mut entity = EntityStatements::new(format!("E{id}"));
            entity
                .balance_sheet
                .insert("AssetsTotal".into(), closing_line(bs[0]));
            entity
                .balance_sheet
                .insert("LiabilitiesAndEquityTotal".into(), closing_line(bs[1]));
            let receivables = BalanceSheetLine {
                closing: None,
                opening: bs[2],
                delta: bs[3],
            };
            entity
                .balance_sheet
                .insert("ReceivablesMovement".into(), receivables);
            let equity_lines = [
                "EquityOpening",
                "EquityClosing",
                "ProfitForTheYear",
                "DividendsPaid",
                "OtherEquityMovements",
                "Dividends",
            ];
            for (line, amount) in equity_lines.into_iter().zip(eq) {
                entity.equity.insert(line.into(), amount_line(amount));
            }
            entity
                .income_statement
                .insert("ExtraordinaryIncome".into(), amount_line(is[0]));
            entity
                .income_statement
                .insert("WriteDownsInvestments".into(), amount_line(is[1]));
            entity
        })
}

fn arb_model() -> impl Strategy<Value = StatementModel> {
    (1usize..6)
        .prop_flat_map(|count| (0..count).map(arb_entity).collect::<Vec<_>>())
        .prop_map(|entities| {
            let mut model = StatementModel::new();
            for entity in entities {
                let id = entity.entity_id.clone();
                *model.entry(&id) = entity;
            }
            model
        })
}

fn rank(signal_type: SignalType) -> usize {
    SignalType::ALL
        .iter()
        .position(|t| *t == signal_type)
        .unwrap_or(usize::MAX)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Within the absolute tolerance every delta passes, whatever the base.
    #[test]
    fn prop_absolute_tolerance_always_passes(
        delta in arb_amount(),
        base in arb_amount(),
        pct in (0i64..1000).prop_map(|n| Decimal::new(n, 4)),
    ) {
        prop_assert!(within_tolerance(delta, delta.abs(), pct, base));
    }

    /// A zero base only passes on the absolute criterion.
    #[test]
    fn prop_zero_base_is_absolute_only(
        delta in arb_amount(),
        abs_tol in (0i64..1_000_000).prop_map(Decimal::from),
    ) {
        prop_assert_eq!(
            within_tolerance(delta, abs_tol, Decimal::ONE, Decimal::ZERO),
            delta.abs() <= abs_tol
        );
    }

    /// Equal totals never break the balance sheet identity.
    #[test]
    fn prop_equal_totals_never_break(total in arb_amount()) {
        let mut entity = EntityStatements::new("ACME");
        for line in ["AssetsTotal", "LiabilitiesAndEquityTotal"] {
            entity.balance_sheet.insert(line.into(), closing_line(Some(total)));
        }
        let signals = ConstraintEngine::default().evaluate_entity(&entity);
        prop_assert!(signals.iter().all(|s| s.signal_type != SignalType::EquationBreak));
    }

    /// A closing equal to the computed roll-forward never breaks it.
    #[test]
    fn prop_consistent_rollforward_never_breaks(
        opening in arb_amount(),
        profit in arb_amount(),
        dividends in arb_amount(),
        other in arb_amount(),
    ) {
        let closing = opening + profit - dividends + other;
        let mut entity = EntityStatements::new("ACME");
        for (line, amount) in [
            ("EquityOpening", opening),
            ("ProfitAfterTax", profit),
            ("Dividends", dividends),
            ("OtherEquityMovements", other),
            ("EquityClosing", closing),
        ] {
            entity.equity.insert(line.into(), amount_line(Some(amount)));
        }
        let signals = ConstraintEngine::default().evaluate_entity(&entity);
        prop_assert!(signals.iter().all(|s| s.signal_type != SignalType::RollforwardBreak));
    }

    /// Each entity gets each signal type at most once, in check order, and
    /// entities appear in model order.
    #[test]
    fn prop_signal_order_is_deterministic(model in arb_model()) {
        let signals = ConstraintEngine::new(Tolerance::default()).evaluate(&model);
        let positions: Vec<(usize, usize)> = signals
            .iter()
            .map(|s| {
                let entity = model
                    .entities()
                    .iter()
                    .position(|e| e.entity_id == s.entity_id)
                    .unwrap_or(usize::MAX);
                (entity, rank(s.signal_type))
            })
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    /// Parallel evaluation yields the same sequence as sequential.
    #[test]
    fn prop_parallel_equals_sequential(model in arb_model()) {
        let engine = ConstraintEngine::default();
        prop_assert_eq!(
            engine.evaluate(&model),
            engine.with_parallel(true).evaluate(&model)
        );
    }
}
