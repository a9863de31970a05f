//! Joins engine signals with rule metadata.

use tracing::debug;

use super::types::{AnnotatedSignal, DEFAULT_INPUT_DATASET, REPORT_ID, RunReport};
use crate::constraints::Signal;
use crate::rules::RuleTable;

/// Builds run reports from engine output.
pub struct ReportAssembler;

impl ReportAssembler {
    /// Annotates every signal and wraps them in a [`RunReport`].
    ///
    /// `source_file` is the dataset's own name for itself; when absent the
    /// default dataset name is reported.
    #[must_use]
    pub fn assemble(
        signals: Vec<Signal>,
        rules: &RuleTable,
        source_file: Option<&str>,
    ) -> RunReport {
        let signals: Vec<AnnotatedSignal> = signals
            .into_iter()
            .map(|signal| {
                let metadata = rules.lookup(signal.signal_type.code());
                AnnotatedSignal { signal, metadata }
            })
            .collect();

        let input_dataset = source_file.unwrap_or(DEFAULT_INPUT_DATASET).to_string();
        debug!(input = %input_dataset, signals = signals.len(), "Report assembled");

        RunReport {
            report_id: REPORT_ID.to_string(),
            input_dataset,
            signals_count: signals.len(),
            signals,
        }
    }
}
