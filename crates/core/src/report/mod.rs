//! Run report assembly and rendering.
//!
//! This module turns engine signals into the final report:
//! - Rule table annotation of every signal
//! - The run report envelope
//! - JSON and Markdown renderings

pub mod assembler;
pub mod error;
pub mod render;
pub mod types;


pub use assembler::ReportAssembler;
pub use error::ReportError;
pub use render::{from_json, to_json, to_markdown};
pub use types::{AnnotatedSignal, DEFAULT_INPUT_DATASET, REPORT_ID, RunReport};
