//! Per-entity constraint checks.
//!
//! Each check is a pure function of one entity's statements. A check whose
//! inputs are absent is skipped and returns `None`; so does a check whose
//! arithmetic leaves the Decimal range.

use rust_decimal::Decimal;
use tracing::warn;

use super::lines;
use super::signal::{Signal, SignalDetails, SignalType};
use crate::statements::EntityStatements;
use crate::tolerance::Tolerance;

/// Amount above which income or impairment is considered material.
pub const MATERIALITY_THRESHOLD: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Minimum receivable movement, as a fraction of extraordinary income.
pub const COUNTERPART_RATIO: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

fn overflow(signal_type: SignalType, entity: &EntityStatements) -> Option<Signal> {
    warn!(
        entity = %entity.entity_id,
        signal_type = %signal_type,
        "Check skipped: amounts exceed decimal range"
    );
    None
}

/// `AssetsTotal` must equal `LiabilitiesAndEquityTotal` (closing) within tolerance.
#[must_use]
pub fn balance_sheet_identity(entity: &EntityStatements, tolerance: &Tolerance) -> Option<Signal> {
    let assets = entity.closing(lines::ASSETS_TOTAL)?;
    let liabilities_and_equity = entity.closing(lines::LIABILITIES_AND_EQUITY_TOTAL)?;

    let Some(delta) = assets.checked_sub(liabilities_and_equity) else {
        return overflow(SignalType::EquationBreak, entity);
    };
    if tolerance.passes(delta, liabilities_and_equity) {
        return None;
    }

    let details = SignalDetails::new()
        .with("AssetsTotal", assets)
        .with("LiabilitiesAndEquityTotal", liabilities_and_equity)
        .with("delta", delta)
        .with("tolerance_abs", tolerance.absolute())
        .with("tolerance_pct", tolerance.percentage());
    Some(Signal::new(SignalType::EquationBreak, &entity.entity_id, details))
}

/// `opening + profit - dividends + other` must reach closing equity within tolerance.
///
/// Missing profit, dividends or other movements count as zero; opening and
/// closing equity are required.
#[must_use]
pub fn equity_rollforward(entity: &EntityStatements, tolerance: &Tolerance) -> Option<Signal> {
    let opening = entity.equity_amount(lines::EQUITY_OPENING)?;
    let closing = entity.equity_amount(lines::EQUITY_CLOSING)?;
    let profit = entity.first_equity_amount(lines::PROFIT).unwrap_or_default();
    let dividends = entity.first_equity_amount(lines::DIVIDENDS).unwrap_or_default();
    let other = entity
        .equity_amount(lines::OTHER_EQUITY_MOVEMENTS)
        .unwrap_or_default();

    let expected = opening
        .checked_add(profit)
        .and_then(|sum| sum.checked_sub(dividends))
        .and_then(|sum| sum.checked_add(other));
    let computed = expected.and_then(|e| e.checked_sub(closing).map(|delta| (e, delta)));
    let Some((expected, delta)) = computed else {
        return overflow(SignalType::RollforwardBreak, entity);
    };
    if tolerance.passes(delta, closing) {
        return None;
    }

    let details = SignalDetails::new()
        .with("EquityOpening", opening)
        .with("Profit", profit)
        .with("Dividends", dividends)
        .with("OtherEquityMovements", other)
        .with("ExpectedEquityClosing", expected)
        .with("EquityClosing", closing)
        .with("delta", delta)
        .with("tolerance_abs", tolerance.absolute())
        .with("tolerance_pct", tolerance.percentage());
    Some(Signal::new(SignalType::RollforwardBreak, &entity.entity_id, details))
}

/// Dividends may not exceed closing equity by more than the absolute tolerance.
#[must_use]
pub fn dividend_plausibility(entity: &EntityStatements, tolerance: &Tolerance) -> Option<Signal> {
    let closing = entity.equity_amount(lines::EQUITY_CLOSING)?;
    let dividends = entity.first_equity_amount(lines::DIVIDENDS)?;

    // An unrepresentable threshold cannot be exceeded.
    let threshold = closing.abs().checked_add(tolerance.absolute())?;
    if dividends.abs() <= threshold {
        return None;
    }

    let details = SignalDetails::new()
        .with("Dividends", dividends)
        .with("EquityClosing", closing)
        .with("threshold", threshold)
        .with("tolerance_abs", tolerance.absolute());
    Some(Signal::new(
        SignalType::DividendLegalityImpossible,
        &entity.entity_id,
        details,
    ))
}

/// Material extraordinary income should come with a receivable movement of at
/// least [`COUNTERPART_RATIO`] of it. Thresholds are fixed.
#[must_use]
pub fn missing_counterpart(entity: &EntityStatements) -> Option<Signal> {
    let income = entity.income_amount(lines::EXTRAORDINARY_INCOME)?;
    let receivables = entity.movement(lines::RECEIVABLES_MOVEMENT)?;

    let material = income.abs() > MATERIALITY_THRESHOLD;
    if !material || receivables.abs() >= income.abs() * COUNTERPART_RATIO {
        return None;
    }

    let details = SignalDetails::new()
        .with("ExtraordinaryIncome", income)
        .with("ReceivablesMovement", receivables);
    Some(Signal::new(
        SignalType::MissingCounterpart,
        &entity.entity_id,
        details,
    ))
}

/// Impairments of [`MATERIALITY_THRESHOLD`] or more trigger a review.
#[must_use]
pub fn impairment_materiality(entity: &EntityStatements) -> Option<Signal> {
    let impairment = entity.first_income_amount(lines::IMPAIRMENT)?;
    if impairment.abs() < MATERIALITY_THRESHOLD {
        return None;
    }

    let details = SignalDetails::new().with("Impairment", impairment);
    Some(Signal::new(
        SignalType::WritedownCausalityBreak,
        &entity.entity_id,
        details,
    ))
}
