//! Statement model types.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::normalize::Amount;

/// Statement kinds carried by the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatementKind {
    /// Balance sheet.
    #[serde(rename = "BS")]
    BalanceSheet,
    /// Income statement.
    #[serde(rename = "IS")]
    IncomeStatement,
    /// Equity roll-forward.
    #[serde(rename = "EQ")]
    Equity,
}

impl StatementKind {
    /// All kinds in parsing order.
    pub const ALL: [Self; 3] = [Self::BalanceSheet, Self::IncomeStatement, Self::Equity];

    /// Returns the short sheet code (`BS`, `IS`, `EQ`).
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::BalanceSheet => "BS",
            Self::IncomeStatement => "IS",
            Self::Equity => "EQ",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A balance sheet line with closing, opening and movement columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheetLine {
    /// Closing balance.
    pub closing: Amount,
    /// Opening balance.
    pub opening: Amount,
    /// Movement over the period.
    pub delta: Amount,
}

/// An income statement or equity line with a single amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountLine {
    /// Line amount.
    pub amount: Amount,
}

/// All statement lines of one reporting entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityStatements {
    /// Entity identifier as written in the sheets.
    pub entity_id: String,
    /// Balance sheet lines by line identifier.
    pub balance_sheet: BTreeMap<String, BalanceSheetLine>,
    /// Income statement lines by line identifier.
    pub income_statement: BTreeMap<String, AmountLine>,
    /// Equity lines by line identifier.
    pub equity: BTreeMap<String, AmountLine>,
}

impl EntityStatements {
    /// Creates an entity with no lines.
    #[must_use]
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            ..Self::default()
        }
    }

    /// Closing balance of a balance sheet line.
    #[must_use]
    pub fn closing(&self, line_id: &str) -> Amount {
        self.balance_sheet.get(line_id).and_then(|line| line.closing)
    }

    /// Movement column of a balance sheet line.
    #[must_use]
    pub fn movement(&self, line_id: &str) -> Amount {
        self.balance_sheet.get(line_id).and_then(|line| line.delta)
    }

    /// Amount of an income statement line.
    #[must_use]
    pub fn income_amount(&self, line_id: &str) -> Amount {
        self.income_statement.get(line_id).and_then(|line| line.amount)
    }

    /// Amount of an equity line.
    #[must_use]
    pub fn equity_amount(&self, line_id: &str) -> Amount {
        self.equity.get(line_id).and_then(|line| line.amount)
    }

    /// First present income statement amount among `candidates`, in order.
    #[must_use]
    pub fn first_income_amount(&self, candidates: &[&str]) -> Amount {
        first_present(&self.income_statement, candidates)
    }

    /// First present equity amount among `candidates`, in order.
    #[must_use]
    pub fn first_equity_amount(&self, candidates: &[&str]) -> Amount {
        first_present(&self.equity, candidates)
    }

    /// Total number of lines across all statements.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.balance_sheet.len() + self.income_statement.len() + self.equity.len()
    }
}

// A line that exists with an absent amount does not count as present.
fn first_present(lines: &BTreeMap<String, AmountLine>, candidates: &[&str]) -> Amount {
    candidates
        .iter()
        .find_map(|key| lines.get(*key).and_then(|line| line.amount))
}

/// Parsed statements of every entity, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementModel {
    entities: Vec<EntityStatements>,
    index: HashMap<String, usize>,
}

impl StatementModel {
    /// Creates an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entity, inserting it at the end if unseen.
    pub(crate) fn entry(&mut self, entity_id: &str) -> &mut EntityStatements {
        let position = match self.index.get(entity_id) {
            Some(&position) => position,
            None => {
                let position = self.entities.len();
                self.entities.push(EntityStatements::new(entity_id));
                self.index.insert(entity_id.to_string(), position);
                position
            }
        };
        &mut self.entities[position]
    }

    /// Looks up an entity by identifier.
    #[must_use]
    pub fn get(&self, entity_id: &str) -> Option<&EntityStatements> {
        self.index.get(entity_id).map(|&position| &self.entities[position])
    }

    /// Entities in first-seen order.
    #[must_use]
    pub fn entities(&self) -> &[EntityStatements] {
        &self.entities
    }

    /// Number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if no entity was parsed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
