//! Constraint engine running the check battery per entity.

use rayon::prelude::*;
use tracing::{debug, info};

use super::checks;
use super::signal::Signal;
use crate::statements::{EntityStatements, StatementModel};
use crate::tolerance::Tolerance;

/// Runs every check against every entity.
///
/// Signals come out grouped by entity in model order, and within an entity in
/// [`SignalType::ALL`](super::SignalType::ALL) order. Parallel evaluation
/// produces the same sequence.
#[derive(Debug, Clone, Copy)]
pub struct ConstraintEngine {
    tolerance: Tolerance,
    parallel: bool,
}

impl ConstraintEngine {
    /// Creates a sequential engine using `tolerance` for every identity check.
    #[must_use]
    pub const fn new(tolerance: Tolerance) -> Self {
        Self {
            tolerance,
            parallel: false,
        }
    }

    /// Enables or disables evaluation on the rayon pool.
    #[must_use]
    pub const fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// The tolerance in use.
    #[must_use]
    pub const fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    /// Evaluates one entity.
    #[must_use]
    pub fn evaluate_entity(&self, entity: &EntityStatements) -> Vec<Signal> {
        let tolerance = &self.tolerance;
        let signals: Vec<Signal> = [
            checks::balance_sheet_identity(entity, tolerance),
            checks::equity_rollforward(entity, tolerance),
            checks::dividend_plausibility(entity, tolerance),
            checks::missing_counterpart(entity),
            checks::impairment_materiality(entity),
        ]
        .into_iter()
        .flatten()
        .collect();

        debug!(entity = %entity.entity_id, signals = signals.len(), "Entity evaluated");
        signals
    }

    /// Evaluates every entity of the model.
    #[must_use]
    pub fn evaluate(&self, model: &StatementModel) -> Vec<Signal> {
        let entities = model.entities();
        // rayon's indexed collect keeps entity order
        let per_entity: Vec<Vec<Signal>> = if self.parallel {
            entities
                .par_iter()
                .map(|entity| self.evaluate_entity(entity))
                .collect()
        } else {
            entities
                .iter()
                .map(|entity| self.evaluate_entity(entity))
                .collect()
        };

        let signals: Vec<Signal> = per_entity.into_iter().flatten().collect();
        info!(
            entities = entities.len(),
            signals = signals.len(),
            parallel = self.parallel,
            "Constraint checks complete"
        );
        signals
    }
}

impl Default for ConstraintEngine {
    fn default() -> Self {
        Self::new(Tolerance::default())
    }
}
