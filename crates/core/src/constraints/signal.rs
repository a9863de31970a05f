//! Signal types emitted by the constraint checks.

use std::fmt;

use rust_decimal::Decimal;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Severity tier hardcoded per signal type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Accounting identity broken or structurally impossible values.
    Critical,
    /// Material event requiring review.
    High,
    /// Moderate concern.
    Medium,
    /// Informational.
    Low,
}

impl Severity {
    /// Returns the uppercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Statement or statement pair a signal refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatementScope {
    /// Balance sheet.
    #[serde(rename = "BS")]
    BalanceSheet,
    /// Income statement.
    #[serde(rename = "IS")]
    IncomeStatement,
    /// Equity roll-forward.
    #[serde(rename = "EQ")]
    Equity,
    /// Income statement read against the balance sheet.
    #[serde(rename = "IS/BS")]
    IncomeAndBalanceSheet,
}

impl StatementScope {
    /// Returns the scope label used in reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BalanceSheet => "BS",
            Self::IncomeStatement => "IS",
            Self::Equity => "EQ",
            Self::IncomeAndBalanceSheet => "IS/BS",
        }
    }
}

impl fmt::Display for StatementScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signal types, in the order the engine evaluates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalType {
    /// Assets do not equal liabilities plus equity.
    #[serde(rename = "FIN.BS.EQUATION_BREAK")]
    EquationBreak,
    /// Opening equity plus movements does not reach closing equity.
    #[serde(rename = "FIN.EQ.ROLLFORWARD_BREAK")]
    RollforwardBreak,
    /// Dividends exceed closing equity.
    #[serde(rename = "FIN.DIV.LEGALITY_IMPOSSIBLE")]
    DividendLegalityImpossible,
    /// Large income without a matching receivable movement.
    #[serde(rename = "FIN.DEBIT_CREDIT.MISSING_COUNTERPART")]
    MissingCounterpart,
    /// Large impairment or write-down.
    #[serde(rename = "FIN.WRITEDOWN.CAUSALITY_BREAK")]
    WritedownCausalityBreak,
}

impl SignalType {
    /// All signal types in evaluation order.
    pub const ALL: [Self; 5] = [
        Self::EquationBreak,
        Self::RollforwardBreak,
        Self::DividendLegalityImpossible,
        Self::MissingCounterpart,
        Self::WritedownCausalityBreak,
    ];

    /// Returns the dotted identifier used by rule packs.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::EquationBreak => "FIN.BS.EQUATION_BREAK",
            Self::RollforwardBreak => "FIN.EQ.ROLLFORWARD_BREAK",
            Self::DividendLegalityImpossible => "FIN.DIV.LEGALITY_IMPOSSIBLE",
            Self::MissingCounterpart => "FIN.DEBIT_CREDIT.MISSING_COUNTERPART",
            Self::WritedownCausalityBreak => "FIN.WRITEDOWN.CAUSALITY_BREAK",
        }
    }

    /// Returns the severity tier of this signal type.
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::WritedownCausalityBreak => Severity::High,
            Self::EquationBreak
            | Self::RollforwardBreak
            | Self::DividendLegalityImpossible
            | Self::MissingCounterpart => Severity::Critical,
        }
    }

    /// Returns the statement scope of this signal type.
    #[must_use]
    pub const fn statement(self) -> StatementScope {
        match self {
            Self::EquationBreak => StatementScope::BalanceSheet,
            Self::RollforwardBreak | Self::DividendLegalityImpossible => StatementScope::Equity,
            Self::MissingCounterpart | Self::WritedownCausalityBreak => {
                StatementScope::IncomeAndBalanceSheet
            }
        }
    }

    /// Returns the human-readable finding.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::EquationBreak => {
                "Balance sheet equation fails: AssetsTotal != LiabilitiesAndEquityTotal beyond tolerance."
            }
            Self::RollforwardBreak => "Equity roll-forward fails beyond tolerance.",
            Self::DividendLegalityImpossible => {
                "Dividend appears structurally impossible relative to closing equity capacity (pilot test)."
            }
            Self::MissingCounterpart => {
                "Large income event without corresponding receivable movement (heuristic)."
            }
            Self::WritedownCausalityBreak => {
                "Large impairment/write-down triggers structural review."
            }
        }
    }
}

impl fmt::Display for SignalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Named values attached to a signal, in insertion order.
///
/// Each check chooses its own keys; there is no schema shared across types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignalDetails(Vec<(String, Decimal)>);

impl SignalDetails {
    /// Creates an empty detail set.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a named value.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: Decimal) -> Self {
        self.0.push((name.into(), value));
        self
    }

    /// Returns the value recorded under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Decimal> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| *value)
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.0.iter().map(|(key, value)| (key.as_str(), *value))
    }

    /// Number of recorded values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if nothing is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for SignalDetails {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(key, value)| (key, value)))
    }
}

impl<'de> Deserialize<'de> for SignalDetails {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DetailsVisitor;

        impl<'de> Visitor<'de> for DetailsVisitor {
            type Value = SignalDetails;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of detail names to amounts")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, Decimal>()? {
                    entries.push(entry);
                }
                Ok(SignalDetails(entries))
            }
        }

        deserializer.deserialize_map(DetailsVisitor)
    }
}

/// A detected anomaly for one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    /// Signal type.
    #[serde(rename = "type")]
    pub signal_type: SignalType,
    /// Severity tier.
    pub severity: Severity,
    /// Entity the signal was raised for.
    pub entity_id: String,
    /// Statement scope.
    pub statement: StatementScope,
    /// Human-readable finding.
    pub message: String,
    /// Values the check computed or read.
    pub details: SignalDetails,
}

impl Signal {
    /// Creates a signal with the type's fixed severity, scope and message.
    #[must_use]
    pub fn new(
        signal_type: SignalType,
        entity_id: impl Into<String>,
        details: SignalDetails,
    ) -> Self {
        Self {
            signal_type,
            severity: signal_type.severity(),
            entity_id: entity_id.into(),
            statement: signal_type.statement(),
            message: signal_type.message().to_string(),
            details,
        }
    }
}
