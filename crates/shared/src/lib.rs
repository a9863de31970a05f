//! Shared errors and configuration for stafin.
//!
//! This crate provides the pieces used by both the core engine and the binary:
//! - Application-wide error types with stable codes and process exit codes
//! - Configuration management (input/output paths, engine and logging switches)

pub mod config;
pub mod error;

pub use config::{AppConfig, EngineConfig, LoggingConfig, PathsConfig};
pub use error::{AppError, AppResult};
