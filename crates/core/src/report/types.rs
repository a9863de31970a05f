//! Report types.

use serde::{Deserialize, Serialize};

use crate::constraints::Signal;
use crate::rules::RuleMetadata;

/// Fixed identifier of the run report format.
pub const REPORT_ID: &str = "sta.financial.run_report.v0_1";

/// Dataset name reported when the dataset carries no `source_file`.
pub const DEFAULT_INPUT_DATASET: &str = "STA_Pilot_Financials_v0_1.json";

/// A signal joined with its rule table metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedSignal {
    /// The engine finding.
    #[serde(flatten)]
    pub signal: Signal,
    /// Risk metadata looked up by signal type.
    #[serde(flatten)]
    pub metadata: RuleMetadata,
}

/// Outcome of one engine run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Report format identifier, always [`REPORT_ID`].
    pub report_id: String,
    /// Name of the evaluated dataset.
    pub input_dataset: String,
    /// Number of signals.
    pub signals_count: usize,
    /// Signals in emission order.
    pub signals: Vec<AnnotatedSignal>,
}

impl RunReport {
    /// Returns true if no check fired.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.signals.is_empty()
    }
}
