//! Raw cell value normalization.
//!
//! Sheet cells arrive as arbitrary JSON scalars. Every one of them maps to an
//! amount or to "absent"; there is no failure path.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;
use tracing::warn;

/// A normalized amount: a decimal value or absent.
pub type Amount = Option<Decimal>;

/// Coerces a raw cell value into an amount.
///
/// - `null`, booleans, arrays and objects are absent
/// - numbers are taken from their decimal text; numbers outside the decimal
///   range are absent and logged
/// - strings are trimmed, stripped of spaces and `,` separators, then parsed
#[must_use]
pub fn normalize(raw: &Value) -> Amount {
    match raw {
        Value::Number(number) => {
            let text = number.to_string();
            let amount = parse_decimal(&text);
            if amount.is_none() {
                warn!(value = %text, "Numeric cell outside decimal range dropped");
            }
            amount
        }
        Value::String(text) => parse_amount(text),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Parses a human-entered amount such as `"1 234"` or `"1,234.50"`.
#[must_use]
pub fn parse_amount(text: &str) -> Amount {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let compact: String = trimmed.chars().filter(|c| *c != ' ' && *c != ',').collect();
    parse_decimal(&compact)
}

fn parse_decimal(text: &str) -> Amount {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
        .map(|value| value.normalize())
}
