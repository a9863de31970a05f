//! Normalized per-entity statement model.
//!
//! This module turns raw sheet rows into typed statement lines:
//! - Statement kinds and their fixed sheet layouts
//! - Balance sheet and amount lines with normalized values
//! - The entity model in first-seen order
//! - The parser that builds it

pub mod parser;
pub mod types;

pub use parser::{SheetLayout, StatementParser};
pub use types::{AmountLine, BalanceSheetLine, EntityStatements, StatementKind, StatementModel};
