//! Application configuration management.

use serde::Deserialize;

/// Default dataset document path.
pub const DEFAULT_DATASET_PATH: &str = "STA_Pilot_Financials_v0_1.json";
/// Default constraint pack path.
pub const DEFAULT_CONSTRAINTS_PATH: &str =
    "core/financial/constraints/STA_Financial_Constraint_Pack_v0_1.json";
/// Default rule pack path.
pub const DEFAULT_RULES_PATH: &str = "core/financial/rules/STA_Financial_Rule_Pack_v0_1.json";
/// Default JSON report path.
pub const DEFAULT_OUTPUT_JSON_PATH: &str =
    "core/financial/output/STA_Financial_Run_Report_v0_1.json";
/// Default Markdown report path.
pub const DEFAULT_OUTPUT_MD_PATH: &str = "core/financial/output/STA_Financial_Run_Report_v0_1.md";

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Input and output locations.
    #[serde(default)]
    pub paths: PathsConfig,
    /// Constraint engine switches.
    #[serde(default)]
    pub engine: EngineConfig,
    /// Log output switches.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Input and output document paths.
#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    /// Dataset document (sheets BS, IS, EQ).
    #[serde(default = "default_dataset")]
    pub dataset: String,
    /// Constraint pack with tolerance defaults.
    #[serde(default = "default_constraints")]
    pub constraints: String,
    /// Rule pack mapping signal types to risk metadata.
    #[serde(default = "default_rules")]
    pub rules: String,
    /// Where the JSON report is written.
    #[serde(default = "default_output_json")]
    pub output_json: String,
    /// Where the Markdown report is written.
    #[serde(default = "default_output_md")]
    pub output_md: String,
}

fn default_dataset() -> String {
    DEFAULT_DATASET_PATH.to_string()
}

fn default_constraints() -> String {
    DEFAULT_CONSTRAINTS_PATH.to_string()
}

fn default_rules() -> String {
    DEFAULT_RULES_PATH.to_string()
}

fn default_output_json() -> String {
    DEFAULT_OUTPUT_JSON_PATH.to_string()
}

fn default_output_md() -> String {
    DEFAULT_OUTPUT_MD_PATH.to_string()
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            dataset: default_dataset(),
            constraints: default_constraints(),
            rules: default_rules(),
            output_json: default_output_json(),
            output_md: default_output_md(),
        }
    }
}

/// Constraint engine configuration.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct EngineConfig {
    /// Evaluate entities on the rayon pool. Signal order is unchanged.
    #[serde(default)]
    pub parallel: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct LoggingConfig {
    /// Emit log lines as JSON instead of the human format.
    #[serde(default)]
    pub json: bool,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones winning: `config/default`, `config/{RUN_MODE}`, then
    /// `STAFIN__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("STAFIN").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
