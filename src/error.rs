use std::path::PathBuf;
use thiserror::Error;

/// The main error type for winedata operations.
#[derive(Debug, Error)]
pub enum PrepError {
    #[error("IO error at {path}: {source}")]
    IoAt {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML from {path}: {source}")]
    YamlParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("YAML file is empty: {path}")]
    EmptyYaml { path: PathBuf },

    #[error("Failed to parse JSON from {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write JSON to {path}: {source}")]
    JsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse CSV from {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Malformed CSV row in {path} at line {line}: expected at most {expected} fields, found {found}")]
    CsvRecord {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Failed to encode binary artifact for {path}: {message}")]
    BinEncode { path: PathBuf, message: String },

    #[error("Failed to decode binary artifact from {path}: {message}")]
    BinDecode { path: PathBuf, message: String },

    #[error("Checksum mismatch in binary artifact {path}: expected {expected:#010x}, got {actual:#010x}")]
    BinChecksum {
        path: PathBuf,
        expected: u32,
        actual: u32,
    },

    #[error("Failed to download {url}: {message}")]
    Download { url: String, message: String },

    #[error("Failed to extract zip archive {path}: {source}")]
    Zip {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Invalid source URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Missing key '{key}' in {path}")]
    MissingKey { path: PathBuf, key: String },

    #[error("Invalid configuration in {path}: {message}")]
    InvalidConfig { path: PathBuf, message: String },

    #[error("Schema validation failed for {path}")]
    ValidationFailed { path: PathBuf },
}

impl PrepError {
    /// Wraps an IO error with the path it occurred on.
    pub fn io_at(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PrepError::IoAt {
            path: path.into(),
            source,
        }
    }
}
