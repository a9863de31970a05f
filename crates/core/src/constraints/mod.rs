//! Constraint checks over the statement model.
//!
//! This module implements the signal battery:
//! - Signal types, severities and detail payloads
//! - The five per-entity checks (identity, roll-forward, dividends,
//!   counterpart heuristic, impairment materiality)
//! - The engine running them per entity in a fixed order

pub mod checks;
pub mod engine;
pub mod lines;
pub mod signal;

#[cfg(test)]
mod engine_props;

pub use engine::ConstraintEngine;
pub use signal::{Severity, Signal, SignalDetails, SignalType, StatementScope};
