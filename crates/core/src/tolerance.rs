//! Absolute-or-relative tolerance comparisons.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Returns true if `delta` is within `abs_tol`, or within `pct_tol` of `base`.
///
/// Either criterion is sufficient. A zero `base` disables the relative
/// criterion. `base` is the reference magnitude chosen by the caller and need
/// not be an operand of `delta`.
#[must_use]
pub fn within_tolerance(
    delta: Decimal,
    abs_tol: Decimal,
    pct_tol: Decimal,
    base: Decimal,
) -> bool {
    let magnitude = delta.abs();
    if magnitude <= abs_tol {
        return true;
    }
    if base.is_zero() {
        return false;
    }
    // A limit beyond the Decimal range bounds nothing.
    base.abs()
        .checked_mul(pct_tol)
        .is_none_or(|limit| magnitude <= limit)
}

/// Tolerance applied to identity checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tolerance {
    absolute: Decimal,
    percentage: Decimal,
}

impl Tolerance {
    /// Creates a tolerance. Both values are expected to be non-negative.
    #[must_use]
    pub const fn new(absolute: Decimal, percentage: Decimal) -> Self {
        Self {
            absolute,
            percentage,
        }
    }

    /// Absolute tolerance in currency units.
    #[must_use]
    pub const fn absolute(&self) -> Decimal {
        self.absolute
    }

    /// Relative tolerance as a fraction of the base.
    #[must_use]
    pub const fn percentage(&self) -> Decimal {
        self.percentage
    }

    /// Returns true if `delta` passes against `base`.
    #[must_use]
    pub fn passes(&self, delta: Decimal, base: Decimal) -> bool {
        within_tolerance(delta, self.absolute, self.percentage, base)
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::new(Decimal::ONE_THOUSAND, Decimal::new(1, 3))
    }
}
