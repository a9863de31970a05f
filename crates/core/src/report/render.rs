//! JSON and Markdown renderings of a run report.

use super::error::ReportError;
use super::types::RunReport;

/// Renders the report as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`ReportError::Serialization`] if serialization fails.
pub fn to_json(report: &RunReport) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Parses a report previously rendered with [`to_json`].
///
/// # Errors
///
/// Returns [`ReportError::Serialization`] if the text is not a run report.
pub fn from_json(text: &str) -> Result<RunReport, ReportError> {
    Ok(serde_json::from_str(text)?)
}

/// Renders the report as Markdown for human review.
///
/// # Errors
///
/// Returns [`ReportError::Serialization`] if signal details cannot be
/// serialized.
pub fn to_markdown(report: &RunReport) -> Result<String, ReportError> {
    let mut lines = vec![
        "# STA Financial Run Report v0.1".to_string(),
        String::new(),
        format!("- Input: `{}`", report.input_dataset),
        format!("- Signals: **{}**", report.signals_count),
        String::new(),
        "## Signals".to_string(),
        String::new(),
    ];

    if report.signals.is_empty() {
        lines.push("No signals triggered.".to_string());
    }

    for (index, annotated) in report.signals.iter().enumerate() {
        let signal = &annotated.signal;
        let metadata = &annotated.metadata;
        lines.push(format!(
            "### {}. {} — {} — {}",
            index + 1,
            signal.signal_type,
            metadata.risk_level,
            metadata.escalation
        ));
        lines.push(format!("- Entity: `{}`", signal.entity_id));
        lines.push(format!("- Statement: `{}`", signal.statement));
        lines.push(format!("- Message: {}", signal.message));
        lines.push(format!(
            "- Details: `{}`",
            serde_json::to_string(&signal.details)?
        ));
        lines.push(String::new());
    }

    Ok(lines.join("\n"))
}
