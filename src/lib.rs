//! Winedata: data preparation stages for the wine quality pipeline.
//!
//! Winedata fetches the dataset archive, unpacks it, and checks the columns
//! of the extracted CSV file against the declared schema, leaving a
//! one-line status file for downstream stages.
//!
//! # Modules
//!
//! - [`config`]: Loading `config.yaml`, `params.yaml`, `schema.yaml` into typed configs
//! - [`ingestion`]: Archive download and extraction
//! - [`validation`]: Column schema validation and the status file
//! - [`pipeline`]: Stage runners that wire configs to components
//! - [`utils`]: YAML/JSON/binary document I/O and file-system helpers
//! - [`error`]: Error types for winedata operations

pub mod config;
pub mod error;
pub mod ingestion;
pub mod pipeline;
pub mod utils;
pub mod validation;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use config::{ConfigurationManager, CONFIG_FILE_PATH, PARAMS_FILE_PATH, SCHEMA_FILE_PATH};
pub use error::PrepError;
use pipeline::{DataIngestionPipeline, DataValidationPipeline};
use validation::{format_status, ColumnReport, ValidationOutcome};

/// The winedata CLI application.
#[derive(Parser)]
#[command(name = "winedata")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    /// Pipeline configuration file.
    #[arg(long, global = true, default_value = CONFIG_FILE_PATH, env = "WINEDATA_CONFIG")]
    config: PathBuf,

    /// Parameters file.
    #[arg(long, global = true, default_value = PARAMS_FILE_PATH, env = "WINEDATA_PARAMS")]
    params: PathBuf,

    /// Dataset schema file.
    #[arg(long, global = true, default_value = SCHEMA_FILE_PATH, env = "WINEDATA_SCHEMA")]
    schema: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Download the dataset archive (if absent) and extract it.
    Ingest,
    /// Validate the extracted CSV columns against the schema.
    Validate(ValidateArgs),
    /// Run ingestion, then validation.
    Run(ValidateArgs),
}

/// Arguments for the validate and run subcommands.
#[derive(clap::Args)]
struct ValidateArgs {
    /// Output format for the report.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// JSON shape of the validate output.
#[derive(Serialize)]
struct ValidationOutput<'a> {
    status: Option<bool>,
    status_line: Option<String>,
    status_file: &'a std::path::Path,
    report: &'a ColumnReport,
}

/// Run the winedata CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), PrepError> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("winedata {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Data ingestion and schema validation for the wine quality pipeline.");
        println!();
        println!("Run 'winedata --help' for usage information.");
        return Ok(());
    };

    let manager = ConfigurationManager::new(&cli.config, &cli.params, &cli.schema)?;

    match command {
        Commands::Ingest => run_ingest(&manager),
        Commands::Validate(args) => run_validate(&manager, &args),
        Commands::Run(args) => {
            run_ingest(&manager)?;
            run_validate(&manager, &args)
        }
    }
}

/// Execute the ingest subcommand.
fn run_ingest(manager: &ConfigurationManager) -> Result<(), PrepError> {
    let outcome = DataIngestionPipeline.run(manager)?;
    if outcome.downloaded {
        println!("Downloaded dataset archive");
    } else {
        println!("Dataset archive already present, download skipped");
    }
    println!("Extracted {} file(s)", outcome.extracted_files);
    Ok(())
}

/// Execute the validate subcommand.
fn run_validate(manager: &ConfigurationManager, args: &ValidateArgs) -> Result<(), PrepError> {
    let ValidationOutcome {
        status,
        report,
        data_file,
        status_file,
    } = DataValidationPipeline.run_with_report(manager)?;

    match args.output {
        OutputFormat::Json => {
            let output = ValidationOutput {
                status,
                status_line: status.map(format_status),
                status_file: &status_file,
                report: &report,
            };
            let json = serde_json::to_string_pretty(&output).map_err(|source| {
                PrepError::JsonWrite {
                    path: PathBuf::from("<stdout>"),
                    source,
                }
            })?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            print!("{}", report);
            println!();
            match status {
                Some(status) => println!("{}", format_status(status)),
                None => println!("Validation Status: not written (no columns)"),
            }
        }
    }

    if status == Some(false) {
        Err(PrepError::ValidationFailed { path: data_file })
    } else {
        Ok(())
    }
}
