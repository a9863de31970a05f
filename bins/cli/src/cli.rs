//! Command line arguments.

use clap::Parser;

use stafin_shared::AppConfig;

/// Runs the constraint checks over a financial dataset and writes the reports.
#[derive(Parser, Debug)]
#[command(name = "stafin", version, about = "STA financial statement signal engine")]
pub struct Cli {
    /// Dataset document (sheets BS, IS, EQ).
    #[arg(long)]
    pub dataset: Option<String>,
    /// Constraint pack with tolerance defaults.
    #[arg(long)]
    pub constraints: Option<String>,
    /// Rule pack mapping signal types to risk metadata.
    #[arg(long)]
    pub rules: Option<String>,
    /// Where to write the JSON report.
    #[arg(long)]
    pub out_json: Option<String>,
    /// Where to write the Markdown report.
    #[arg(long)]
    pub out_md: Option<String>,
    /// Evaluate entities in parallel.
    #[arg(long)]
    pub parallel: bool,
    /// Emit logs as JSON.
    #[arg(long)]
    pub log_json: bool,
    /// Print a machine-readable summary instead of the report paths.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Overrides configured values with the flags given on the command line.
    pub fn apply(&self, config: &mut AppConfig) {
        let paths = &mut config.paths;
        for (flag, slot) in [
            (&self.dataset, &mut paths.dataset),
            (&self.constraints, &mut paths.constraints),
            (&self.rules, &mut paths.rules),
            (&self.out_json, &mut paths.output_json),
            (&self.out_md, &mut paths.output_md),
        ] {
            if let Some(value) = flag {
                slot.clone_from(value);
            }
        }
        config.engine.parallel |= self.parallel;
        config.logging.json |= self.log_json;
    }
}
