//! Core engine for stafin.
//!
//! This crate contains the pure signal engine with no file or process
//! dependencies. It takes already-loaded documents and returns a report.
//!
//! # Modules
//!
//! - `documents` - Dataset, constraint pack and rule pack decoding
//! - `normalize` - Raw cell values to decimal amounts
//! - `statements` - Per-entity statement model built from the dataset sheets
//! - `tolerance` - Absolute/relative tolerance comparison
//! - `constraints` - Accounting identity and heuristic checks
//! - `rules` - Risk metadata lookup by signal type
//! - `report` - Run report assembly and rendering
//! - `pipeline` - End-to-end run over loaded documents

pub mod constraints;
pub mod documents;
pub mod normalize;
pub mod pipeline;
pub mod report;
pub mod rules;
pub mod statements;
pub mod tolerance;

pub use constraints::{ConstraintEngine, Severity, Signal, SignalDetails, SignalType};
pub use documents::{ConstraintPack, DatasetDocument, DocumentError, RulePack};
pub use pipeline::{RunOptions, run};
pub use report::{AnnotatedSignal, ReportAssembler, ReportError, RunReport};
pub use rules::{RuleMetadata, RuleTable};
pub use statements::{EntityStatements, StatementModel, StatementParser};
pub use tolerance::Tolerance;
