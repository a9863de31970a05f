//! stafin command line runner
//!
//! Loads the dataset, constraint pack and rule pack, runs the signal engine and
//! writes the JSON and Markdown reports.

mod cli;

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use stafin_core::report::{to_json, to_markdown};
use stafin_core::{ConstraintPack, DatasetDocument, RulePack, RunOptions};
use stafin_shared::{AppConfig, AppError};

use crate::cli::Cli;

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            let err = AppError::from(err);
            eprintln!("Error: {err}");
            return ExitCode::from(err.exit_code());
        }
    };
    cli.apply(&mut config);

    init_tracing(config.logging.json);

    match execute(&config, cli.json) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let app_error = err.chain().find_map(|cause| cause.downcast_ref::<AppError>());
            let error_code = app_error.map_or("INTERNAL_ERROR", AppError::error_code);
            error!(error_code, "Run failed");
            eprintln!("Error: {err:#}");
            ExitCode::from(app_error.map_or(70, AppError::exit_code))
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "stafin=info".into());
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}

fn execute(config: &AppConfig, json: bool) -> anyhow::Result<()> {
    let paths = &config.paths;

    let dataset = DatasetDocument::from_json(&read_document(&paths.dataset)?)
        .map_err(AppError::from)
        .with_context(|| format!("Invalid dataset {}", paths.dataset))?;
    info!(path = %paths.dataset, "Dataset loaded");

    let constraints = ConstraintPack::from_json(&read_document(&paths.constraints)?)
        .map_err(AppError::from)
        .with_context(|| format!("Invalid constraint pack {}", paths.constraints))?;
    info!(path = %paths.constraints, "Constraint pack loaded");

    let rules = RulePack::from_json(&read_document(&paths.rules)?)
        .map_err(AppError::from)
        .with_context(|| format!("Invalid rule pack {}", paths.rules))?;
    info!(path = %paths.rules, "Rule pack loaded");

    let options = RunOptions {
        parallel: config.engine.parallel,
    };
    let report = stafin_core::run(&dataset, &constraints, &rules, options)
        .map_err(AppError::from)
        .with_context(|| format!("Unusable constraint pack {}", paths.constraints))?;

    write_output(&paths.output_json, &to_json(&report).map_err(AppError::from)?)?;
    write_output(&paths.output_md, &to_markdown(&report).map_err(AppError::from)?)?;

    if json {
        let summary = serde_json::json!({
            "report_json": paths.output_json,
            "report_md": paths.output_md,
            "signals_count": report.signals_count,
        });
        let text = serde_json::to_string_pretty(&summary)
            .map_err(|err| AppError::Internal(err.to_string()))?;
        println!("{text}");
    } else {
        println!("{}", paths.output_json);
        println!("{}", paths.output_md);
    }
    Ok(())
}

fn read_document(path: &str) -> anyhow::Result<String> {
    let text = fs::read_to_string(path)
        .map_err(|err| AppError::Io(format!("{path}: {err}")))
        .context("Failed to read input document")?;
    Ok(text)
}

fn write_output(path: &str, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|err| AppError::Io(format!("{}: {err}", parent.display())))
            .context("Failed to create output directory")?;
    }
    fs::write(path, contents)
        .map_err(|err| AppError::Io(format!("{path}: {err}")))
        .context("Failed to write report")?;
    info!(path, "Report written");
    Ok(())
}
