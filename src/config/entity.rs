//! Typed configuration handed to each pipeline component.

use std::path::PathBuf;

use serde::Deserialize;
use serde_json::{Map, Value};
use url::Url;

/// Declared columns of the tabular dataset, in document order.
///
/// Only the column names take part in validation; the descriptors (e.g.
/// `float64`) are carried along for reporting.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Schema {
    columns: Map<String, Value>,
}

impl Schema {
    pub fn new(columns: Map<String, Value>) -> Self {
        Self { columns }
    }

    /// Returns true if `column` is declared.
    pub fn contains(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn descriptor(&self, column: &str) -> Option<&Value> {
        self.columns.get(column)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Schema {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            columns: iter
                .into_iter()
                .map(|(name, descriptor)| (name.into(), descriptor.into()))
                .collect(),
        }
    }
}

/// Where to fetch the dataset archive from and where to unpack it.
#[derive(Clone, Debug, PartialEq)]
pub struct DataIngestionConfig {
    pub root_dir: PathBuf,
    pub source_url: Url,
    pub local_data_file: PathBuf,
    pub unzip_dir: PathBuf,
}

/// Inputs and outputs of one schema validation run.
#[derive(Clone, Debug, PartialEq)]
pub struct DataValidationConfig {
    pub root_dir: PathBuf,
    /// The extracted CSV file to validate.
    pub unzip_data_dir: PathBuf,
    pub status_file: PathBuf,
    pub all_schema: Schema,
}

/// `data_ingestion` section of `config.yaml` as written on disk.
#[derive(Debug, Deserialize)]
pub(crate) struct DataIngestionSection {
    pub root_dir: PathBuf,
    #[serde(rename = "source_URL")]
    pub source_url: String,
    pub local_data_file: PathBuf,
    pub unzip_dir: PathBuf,
}

/// `data_validation` section of `config.yaml` as written on disk.
#[derive(Debug, Deserialize)]
pub(crate) struct DataValidationSection {
    pub root_dir: PathBuf,
    pub unzip_data_dir: PathBuf,
    #[serde(rename = "STATUS_FILE")]
    pub status_file: PathBuf,
}
