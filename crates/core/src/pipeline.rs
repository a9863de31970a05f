//! End-to-end run over loaded documents.

use tracing::info;

use crate::constraints::ConstraintEngine;
use crate::documents::{ConstraintPack, DatasetDocument, DocumentError, RulePack};
use crate::report::{ReportAssembler, RunReport};
use crate::rules::RuleTable;
use crate::statements::StatementParser;

/// Options for a run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Evaluate entities on the rayon pool.
    pub parallel: bool,
}

/// Parses the dataset, runs every check and assembles the report.
///
/// The constraint pack is validated before any entity is processed, so an
/// unusable pack never yields a partial report.
///
/// # Errors
///
/// Returns [`DocumentError::NegativeTolerance`] if the pack's tolerances are
/// negative.
pub fn run(
    dataset: &DatasetDocument,
    constraints: &ConstraintPack,
    rules: &RulePack,
    options: RunOptions,
) -> Result<RunReport, DocumentError> {
    let tolerance = constraints.tolerance()?;
    let rules = RuleTable::from_pack(rules);

    let model = StatementParser::parse(dataset);
    info!(entities = model.len(), rules = rules.len(), "Statements parsed");

    let signals = ConstraintEngine::new(tolerance)
        .with_parallel(options.parallel)
        .evaluate(&model);

    Ok(ReportAssembler::assemble(
        signals,
        &rules,
        dataset.source_file.as_deref(),
    ))
}
