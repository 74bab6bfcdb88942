//! Pipeline stages.
//!
//! A stage builds its component config from the [`ConfigurationManager`],
//! runs the component, and brackets the work with start/completion log
//! lines so a multi-stage run reads clearly in the logs. Failures are logged
//! once here and returned to the caller.

use crate::config::ConfigurationManager;
use crate::error::PrepError;
use crate::ingestion::{DataIngestion, HttpTransport, Transport};
use crate::validation::{DataValidation, ValidationOutcome};

pub const INGESTION_STAGE: &str = "Data Ingestion";
pub const VALIDATION_STAGE: &str = "Data Validation";

/// Outcome of the ingestion stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IngestionOutcome {
    /// False when the archive was already present locally.
    pub downloaded: bool,
    pub extracted_files: usize,
}

/// Downloads and extracts the dataset archive.
#[derive(Clone, Debug, Default)]
pub struct DataIngestionPipeline;

impl DataIngestionPipeline {
    pub fn run(&self, manager: &ConfigurationManager) -> Result<IngestionOutcome, PrepError> {
        self.run_with_transport(manager, HttpTransport::new())
    }

    pub fn run_with_transport<T: Transport>(
        &self,
        manager: &ConfigurationManager,
        transport: T,
    ) -> Result<IngestionOutcome, PrepError> {
        run_stage(INGESTION_STAGE, || {
            let config = manager.get_data_ingestion_config()?;
            let ingestion = DataIngestion::with_transport(config, transport);
            let downloaded = ingestion.download_file()?.is_some();
            let extracted_files = ingestion.extract_zip_file()?;
            Ok(IngestionOutcome {
                downloaded,
                extracted_files,
            })
        })
    }
}

/// Validates the extracted CSV against the schema.
#[derive(Clone, Debug, Default)]
pub struct DataValidationPipeline;

impl DataValidationPipeline {
    /// Returns the persisted status, or `None` if the file had no columns.
    pub fn run(&self, manager: &ConfigurationManager) -> Result<Option<bool>, PrepError> {
        run_stage(VALIDATION_STAGE, || {
            let config = manager.get_data_validation_config()?;
            DataValidation::new(config).validate_all_columns()
        })
    }

    /// Like [`DataValidationPipeline::run`], also returning the column report
    /// and the paths involved. The CSV is read once.
    pub fn run_with_report(
        &self,
        manager: &ConfigurationManager,
    ) -> Result<ValidationOutcome, PrepError> {
        run_stage(VALIDATION_STAGE, || {
            let config = manager.get_data_validation_config()?;
            DataValidation::new(config).validate_with_report()
        })
    }
}

fn run_stage<T>(
    name: &str,
    stage: impl FnOnce() -> Result<T, PrepError>,
) -> Result<T, PrepError> {
    tracing::info!(">>>>>> stage {} started <<<<<<", name);
    match stage() {
        Ok(value) => {
            tracing::info!(">>>>>> stage {} completed <<<<<<", name);
            Ok(value)
        }
        Err(err) => {
            tracing::error!(stage = name, "stage failed: {}", err);
            Err(err)
        }
    }
}
