//! Sheet row parsing into the statement model.

use serde_json::Value;
use tracing::debug;

use super::types::{AmountLine, BalanceSheetLine, StatementKind, StatementModel};
use crate::documents::{DatasetDocument, Row, scalar_text};
use crate::normalize::{Amount, normalize};

/// Column label holding the line identifier on every sheet.
pub const LINE_COLUMN: &str = "Unnamed: 1";

/// Fixed column labels of one sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetLayout {
    /// Column holding the entity identifier.
    pub entity_column: &'static str,
    /// Column holding the line identifier.
    pub line_column: &'static str,
    /// Value columns in position order. Balance sheet: closing, opening, delta.
    /// Other sheets: amount.
    pub value_columns: &'static [&'static str],
}

impl SheetLayout {
    /// Returns the layout used by a sheet kind.
    #[must_use]
    pub const fn for_kind(kind: StatementKind) -> Self {
        match kind {
            StatementKind::BalanceSheet => Self {
                entity_column: "Balance_sheet",
                line_column: LINE_COLUMN,
                value_columns: &["Unnamed: 2", "Unnamed: 3", "Unnamed: 4"],
            },
            StatementKind::IncomeStatement => Self {
                entity_column: "Income statement",
                line_column: LINE_COLUMN,
                value_columns: &["Unnamed: 2"],
            },
            StatementKind::Equity => Self {
                entity_column: "Equity",
                line_column: LINE_COLUMN,
                value_columns: &["Unnamed: 2"],
            },
        }
    }

    /// Returns `(entity_id, line_id)` if both are non-blank.
    fn identifiers(&self, row: &Row) -> Option<(String, String)> {
        let entity_id = cell_text(row.get(self.entity_column));
        let line_id = cell_text(row.get(self.line_column));
        if entity_id.is_empty() || line_id.is_empty() {
            return None;
        }
        Some((entity_id, line_id))
    }

    fn value(&self, row: &Row, position: usize) -> Amount {
        self.value_columns
            .get(position)
            .and_then(|column| row.get(*column))
            .and_then(normalize)
    }
}

fn cell_text(cell: Option<&Value>) -> String {
    cell.and_then(scalar_text)
        .map(|text| text.trim().to_string())
        .unwrap_or_default()
}

/// Builds the per-entity statement model from a dataset.
pub struct StatementParser;

impl StatementParser {
    /// Parses all three sheets.
    ///
    /// Rows with a blank entity or line identifier are dropped. A later row for
    /// the same entity, sheet and line replaces the earlier one.
    #[must_use]
    pub fn parse(dataset: &DatasetDocument) -> StatementModel {
        let mut model = StatementModel::new();
        for kind in StatementKind::ALL {
            Self::parse_sheet(&mut model, kind, dataset.sheets.rows(kind));
        }
        debug!(entities = model.len(), "Statement model built");
        model
    }

    fn parse_sheet(model: &mut StatementModel, kind: StatementKind, rows: &[Row]) {
        let layout = SheetLayout::for_kind(kind);
        let mut skipped = 0usize;

        for row in rows {
            let Some((entity_id, line_id)) = layout.identifiers(row) else {
                skipped += 1;
                continue;
            };
            let entity = model.entry(&entity_id);
            match kind {
                StatementKind::BalanceSheet => {
                    let line = BalanceSheetLine {
                        closing: layout.value(row, 0),
                        opening: layout.value(row, 1),
                        delta: layout.value(row, 2),
                    };
                    entity.balance_sheet.insert(line_id, line);
                }
                StatementKind::IncomeStatement => {
                    let line = AmountLine {
                        amount: layout.value(row, 0),
                    };
                    entity.income_statement.insert(line_id, line);
                }
                StatementKind::Equity => {
                    let line = AmountLine {
                        amount: layout.value(row, 0),
                    };
                    entity.equity.insert(line_id, line);
                }
            }
        }

        debug!(sheet = %kind, rows = rows.len(), skipped, "Parsed sheet");
    }
}
