//! Pipeline configuration.
//!
//! [`ConfigurationManager`] loads the three project documents
//! (`config.yaml`, `params.yaml`, `schema.yaml`) once per run and hands out
//! typed config structs to the pipeline stages. Building a stage config also
//! creates that stage's `root_dir`.
//!
//! Relative paths inside the documents are used as written, i.e. relative to
//! the working directory the pipeline is launched from.

mod entity;

pub use entity::{DataIngestionConfig, DataValidationConfig, Schema};

use std::path::{Path, PathBuf};

use crate::error::PrepError;
use crate::utils::{create_directories, read_yaml, ConfigBox};
use entity::{DataIngestionSection, DataValidationSection};

/// Default location of the main pipeline configuration.
pub const CONFIG_FILE_PATH: &str = "config/config.yaml";
/// Default location of the model/training parameters.
pub const PARAMS_FILE_PATH: &str = "params.yaml";
/// Default location of the dataset schema.
pub const SCHEMA_FILE_PATH: &str = "schema.yaml";

/// Loads project configuration and builds per-stage configs.
#[derive(Clone, Debug)]
pub struct ConfigurationManager {
    config: ConfigBox,
    params: ConfigBox,
    schema: ConfigBox,
}

impl ConfigurationManager {
    /// Reads the three documents and creates `artifacts_root`.
    pub fn new(
        config_path: &Path,
        params_path: &Path,
        schema_path: &Path,
    ) -> Result<Self, PrepError> {
        let config = read_yaml(config_path)?;
        let params = read_yaml(params_path)?;
        let schema = read_yaml(schema_path)?;
        Self::from_documents(config, params, schema)
    }

    /// Builds a manager from already loaded documents and creates `artifacts_root`.
    pub fn from_documents(
        config: ConfigBox,
        params: ConfigBox,
        schema: ConfigBox,
    ) -> Result<Self, PrepError> {
        let artifacts_root = PathBuf::from(config.require_str("artifacts_root")?);
        create_directories(&[artifacts_root], true)?;
        Ok(Self {
            config,
            params,
            schema,
        })
    }

    /// Parameters for later stages; not interpreted here.
    pub fn params(&self) -> &ConfigBox {
        &self.params
    }

    /// The `TARGET_COLUMN.name` entry of the schema, if declared.
    pub fn target_column(&self) -> Option<&str> {
        self.schema
            .path("TARGET_COLUMN.name")
            .and_then(serde_json::Value::as_str)
    }

    pub fn get_data_ingestion_config(&self) -> Result<DataIngestionConfig, PrepError> {
        let section: DataIngestionSection = self.config.section("data_ingestion")?.deserialize()?;
        create_directories(&[&section.root_dir], true)?;

        let source_url =
            url::Url::parse(&section.source_url).map_err(|source| PrepError::InvalidUrl {
                url: section.source_url.clone(),
                source,
            })?;

        Ok(DataIngestionConfig {
            root_dir: section.root_dir,
            source_url,
            local_data_file: section.local_data_file,
            unzip_dir: section.unzip_dir,
        })
    }

    pub fn get_data_validation_config(&self) -> Result<DataValidationConfig, PrepError> {
        let section: DataValidationSection =
            self.config.section("data_validation")?.deserialize()?;
        let columns = self.schema.section("COLUMNS")?;
        create_directories(&[&section.root_dir], true)?;

        Ok(DataValidationConfig {
            root_dir: section.root_dir,
            unzip_data_dir: section.unzip_data_dir,
            status_file: section.status_file,
            all_schema: Schema::new(columns.as_map().clone()),
        })
    }
}
