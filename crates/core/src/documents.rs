//! Input document shapes: dataset, constraint pack and rule pack.
//!
//! These are the already-loaded documents the engine consumes. Reading them
//! from disk is the caller's business.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

use stafin_shared::AppError;

use crate::statements::StatementKind;
use crate::tolerance::Tolerance;

/// A raw sheet row: column label to cell value.
pub type Row = Map<String, Value>;

/// Text of a scalar value: strings as-is, anything else by its JSON text.
/// `null` has no text.
#[must_use]
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// Errors raised while reading an input document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Document is not valid JSON or does not have the expected shape.
    #[error("Malformed {document} document: {source}")]
    Json {
        /// Which document failed.
        document: &'static str,
        /// Underlying decoder error.
        #[source]
        source: serde_json::Error,
    },

    /// A tolerance default is below zero.
    #[error("Tolerance {field} must not be negative, got {value}")]
    NegativeTolerance {
        /// Field name in `tolerance_defaults`.
        field: &'static str,
        /// Offending value.
        value: Decimal,
    },
}

impl From<DocumentError> for AppError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::Json { .. } => Self::Parse(err.to_string()),
            DocumentError::NegativeTolerance { .. } => Self::Validation(err.to_string()),
        }
    }
}

fn parse_document<T: DeserializeOwned>(
    document: &'static str,
    text: &str,
) -> Result<T, DocumentError> {
    serde_json::from_str(text).map_err(|source| DocumentError::Json { document, source })
}

/// Exported financial dataset with one row collection per statement kind.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatasetDocument {
    /// Identifier of the workbook the dataset was exported from.
    #[serde(default)]
    pub source_file: Option<String>,
    /// Sheet rows.
    #[serde(default)]
    pub sheets: Sheets,
}

/// Row collections keyed by sheet name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sheets {
    /// Balance sheet rows.
    #[serde(rename = "BS", default)]
    pub balance_sheet: Vec<Row>,
    /// Income statement rows.
    #[serde(rename = "IS", default)]
    pub income_statement: Vec<Row>,
    /// Equity statement rows.
    #[serde(rename = "EQ", default)]
    pub equity: Vec<Row>,
}

impl Sheets {
    /// Returns the rows of one sheet.
    #[must_use]
    pub fn rows(&self, kind: StatementKind) -> &[Row] {
        match kind {
            StatementKind::BalanceSheet => &self.balance_sheet,
            StatementKind::IncomeStatement => &self.income_statement,
            StatementKind::Equity => &self.equity,
        }
    }
}

impl DatasetDocument {
    /// Decodes a dataset from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a dataset document.
    pub fn from_json(text: &str) -> Result<Self, DocumentError> {
        parse_document("dataset", text)
    }
}

/// Constraint pack. Only the tolerance defaults are read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConstraintPack {
    /// Process-wide tolerance defaults.
    #[serde(default)]
    pub tolerance_defaults: ToleranceDefaults,
}

/// Tolerance defaults as written in the constraint pack.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ToleranceDefaults {
    /// Absolute tolerance in currency units.
    #[serde(default = "default_absolute")]
    pub absolute: Decimal,
    /// Relative tolerance as a fraction of the base (0.001 = 0.1%).
    #[serde(default = "default_percentage")]
    pub percentage: Decimal,
}

fn default_absolute() -> Decimal {
    Decimal::ONE_THOUSAND
}

fn default_percentage() -> Decimal {
    Decimal::new(1, 3)
}

impl Default for ToleranceDefaults {
    fn default() -> Self {
        Self {
            absolute: default_absolute(),
            percentage: default_percentage(),
        }
    }
}

impl ConstraintPack {
    /// Decodes a constraint pack from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a constraint pack.
    pub fn from_json(text: &str) -> Result<Self, DocumentError> {
        parse_document("constraint pack", text)
    }

    /// Returns the validated global tolerance.
    ///
    /// # Errors
    ///
    /// Returns an error if either default is negative.
    pub fn tolerance(&self) -> Result<Tolerance, DocumentError> {
        let ToleranceDefaults { absolute, percentage } = self.tolerance_defaults;
        if absolute < Decimal::ZERO {
            return Err(DocumentError::NegativeTolerance {
                field: "absolute",
                value: absolute,
            });
        }
        if percentage < Decimal::ZERO {
            return Err(DocumentError::NegativeTolerance {
                field: "percentage",
                value: percentage,
            });
        }
        Ok(Tolerance::new(absolute, percentage))
    }
}

/// Rule pack mapping signal types to risk metadata.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RulePack {
    /// Rule entries; later entries override earlier ones.
    #[serde(default)]
    pub rules: Vec<RuleEntry>,
}

/// One rule as written in the rule pack.
///
/// Fields accept any JSON value; read them through [`scalar_text`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleEntry {
    /// Signal type this rule annotates. Entries without one are ignored.
    #[serde(default)]
    pub signal_type: Option<Value>,
    /// Risk level label.
    #[serde(default)]
    pub risk_level: Option<Value>,
    /// Escalation path label.
    #[serde(default)]
    pub escalation: Option<Value>,
    /// Rule identifier.
    #[serde(default)]
    pub rule_id: Option<Value>,
}

impl RulePack {
    /// Decodes a rule pack from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a rule pack.
    pub fn from_json(text: &str) -> Result<Self, DocumentError> {
        parse_document("rule pack", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_dataset_sheets_default_to_empty() {
        let dataset = DatasetDocument::from_json(r#"{"sheets": {"BS": []}}"#).unwrap();
        assert!(dataset.source_file.is_none());
        assert!(dataset.sheets.rows(StatementKind::Equity).is_empty());

        let dataset = DatasetDocument::from_json("{}").unwrap();
        assert!(dataset.sheets.rows(StatementKind::BalanceSheet).is_empty());
    }

    #[test]
    fn test_dataset_rows_keep_raw_cells() {
        let dataset = DatasetDocument::from_json(
            r#"{"source_file": "pilot.xlsx", "sheets": {"IS": [{"Income statement": "ACME", "Unnamed: 1": "Revenue", "Unnamed: 2": "1 000"}]}}"#,
        )
        .unwrap();
        assert_eq!(dataset.source_file.as_deref(), Some("pilot.xlsx"));
        let rows = dataset.sheets.rows(StatementKind::IncomeStatement);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["Unnamed: 2"], Value::String("1 000".into()));
    }

    #[test]
    fn test_malformed_dataset_is_rejected() {
        let err = DatasetDocument::from_json(r#"{"sheets": {"BS": [1, 2]}}"#).unwrap_err();
        assert!(matches!(err, DocumentError::Json { document: "dataset", .. }));
        assert!(matches!(AppError::from(err), AppError::Parse(_)));

        assert!(DatasetDocument::from_json("not json").is_err());
    }

    #[test]
    fn test_tolerance_defaults_when_missing() {
        let pack = ConstraintPack::from_json(r#"{"version": "0.1"}"#).unwrap();
        let tolerance = pack.tolerance().unwrap();
        assert_eq!(tolerance.absolute(), dec!(1000));
        assert_eq!(tolerance.percentage(), dec!(0.001));
    }

    #[test]
    fn test_tolerance_from_pack() {
        let pack = ConstraintPack::from_json(
            r#"{"tolerance_defaults": {"absolute": 500, "percentage": "0.02"}}"#,
        )
        .unwrap();
        let tolerance = pack.tolerance().unwrap();
        assert_eq!(tolerance.absolute(), dec!(500));
        assert_eq!(tolerance.percentage(), dec!(0.02));
    }

    #[test]
    fn test_negative_tolerance_is_rejected() {
        let pack =
            ConstraintPack::from_json(r#"{"tolerance_defaults": {"absolute": -1}}"#).unwrap();
        let err = pack.tolerance().unwrap_err();
        assert!(matches!(
            err,
            DocumentError::NegativeTolerance { field: "absolute", .. }
        ));
        assert!(matches!(AppError::from(err), AppError::Validation(_)));
    }

    #[test]
    fn test_rule_pack_optional_fields() {
        let pack = RulePack::from_json(
            r#"{"rules": [{"signal_type": "FIN.BS.EQUATION_BREAK", "risk_level": "HIGH", "escalation": null}, {"rule_id": "orphan"}]}"#,
        )
        .unwrap();
        assert_eq!(pack.rules.len(), 2);
        assert_eq!(pack.rules[0].risk_level, Some(Value::from("HIGH")));
        assert!(pack.rules[0].escalation.is_none());
        assert!(pack.rules[1].signal_type.is_none());
    }

    #[test]
    fn test_rule_pack_accepts_non_string_metadata() {
        let pack = RulePack::from_json(
            r#"{"rules": [{"signal_type": "FIN.BS.EQUATION_BREAK", "rule_id": 101, "escalation": true}]}"#,
        )
        .unwrap();
        let rule = &pack.rules[0];
        assert_eq!(rule.rule_id.as_ref().and_then(scalar_text).as_deref(), Some("101"));
        assert_eq!(rule.escalation.as_ref().and_then(scalar_text).as_deref(), Some("true"));
    }

    #[test]
    fn test_scalar_text() {
        assert_eq!(scalar_text(&Value::Null), None);
        assert_eq!(scalar_text(&Value::from(" R-01 ")).as_deref(), Some(" R-01 "));
        assert_eq!(scalar_text(&Value::from(2.5)).as_deref(), Some("2.5"));
        assert_eq!(scalar_text(&Value::from(false)).as_deref(), Some("false"));
    }
}
