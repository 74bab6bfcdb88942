//! Schema validation of the ingested CSV file.
//!
//! [`DataValidation::validate_all_columns`] walks the CSV header in file
//! order and, for every column, overwrites the status file with whether that
//! column is declared in the schema. The status left on disk, and the value
//! returned, is therefore the result for the *last* column only:
//!
//! | schema keys | header   | result        |
//! |-------------|----------|---------------|
//! | `a, b`      | `a, b`   | `Some(true)`  |
//! | `a`         | `a, b`   | `Some(false)` |
//! | `a`         | `b, a`   | `Some(true)`  |
//! | any         | (empty)  | `None`        |
//!
//! Downstream stages read the status file as-is, so this order dependence is
//! kept. [`DataValidation::column_report`] gives the full per-column picture
//! without touching the status file.

mod report;

pub use report::{ColumnCheck, ColumnReport};

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::config::DataValidationConfig;
use crate::error::PrepError;

/// Line written to the status file, e.g. `Validation Status: True`.
pub fn format_status(status: bool) -> String {
    format!("Validation Status: {}", if status { "True" } else { "False" })
}

/// Truncates `path` and writes a single status line (no trailing newline).
pub fn write_status(path: &Path, status: bool) -> Result<(), PrepError> {
    fs::write(path, format_status(status)).map_err(|source| PrepError::io_at(path, source))
}

/// Persisted status and full column report from a single read of the CSV.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidationOutcome {
    /// Result for the last column, as written to the status file.
    pub status: Option<bool>,
    pub report: ColumnReport,
    pub data_file: PathBuf,
    pub status_file: PathBuf,
}

/// Schema validation stage component.
#[derive(Clone, Debug)]
pub struct DataValidation {
    config: DataValidationConfig,
}

impl DataValidation {
    pub fn new(config: DataValidationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DataValidationConfig {
        &self.config
    }

    /// Checks every CSV column against the schema, writing the status file
    /// after each check.
    ///
    /// Returns the result for the last column, or `None` if the file has no
    /// columns (in which case the status file is not written).
    ///
    /// # Errors
    /// Any failure to read or parse the CSV file, or to write the status
    /// file, is logged and returned unchanged.
    pub fn validate_all_columns(&self) -> Result<Option<bool>, PrepError> {
        self.logged(|| {
            let columns = read_columns(&self.config.unzip_data_dir)?;
            self.check_columns(&columns)
        })
    }

    /// Same as [`DataValidation::validate_all_columns`], but also builds the
    /// column report from the header it already read.
    pub fn validate_with_report(&self) -> Result<ValidationOutcome, PrepError> {
        self.logged(|| {
            let columns = read_columns(&self.config.unzip_data_dir)?;
            let status = self.check_columns(&columns)?;
            Ok(ValidationOutcome {
                status,
                report: ColumnReport::build(&columns, &self.config.all_schema),
                data_file: self.config.unzip_data_dir.clone(),
                status_file: self.config.status_file.clone(),
            })
        })
    }

    fn logged<T>(&self, check: impl FnOnce() -> Result<T, PrepError>) -> Result<T, PrepError> {
        check().inspect_err(|err| {
            tracing::error!(
                data_file = %self.config.unzip_data_dir.display(),
                status_file = %self.config.status_file.display(),
                error = ?err,
                "column validation failed: {}",
                err
            );
        })
    }

    fn check_columns(&self, columns: &[String]) -> Result<Option<bool>, PrepError> {
        let mut status = None;
        for column in columns {
            let declared = self.config.all_schema.contains(column);
            write_status(&self.config.status_file, declared)?;
            tracing::debug!(column = column.as_str(), declared, "checked column");
            status = Some(declared);
        }
        Ok(status)
    }

    /// Builds a per-column report without writing the status file.
    pub fn column_report(&self) -> Result<ColumnReport, PrepError> {
        let columns = read_columns(&self.config.unzip_data_dir)?;
        Ok(ColumnReport::build(&columns, &self.config.all_schema))
    }
}

/// Loads a CSV file and returns its header in file order.
///
/// Every record is read. Rows shorter than the header are accepted (the
/// missing cells are empty); a row with more fields than the header fails
/// the load. Repeated header names are made unique with a `.N` suffix, so
/// `a,a` reads as `a, a.1`.
pub fn read_columns(path: &Path) -> Result<Vec<String>, PrepError> {
    let file = File::open(path).map_err(|source| PrepError::io_at(path, source))?;
    columns_from_reader(BufReader::new(file), path)
}

/// Reads a CSV header from raw bytes.
///
/// Useful for fuzzing and tests without file I/O.
pub fn columns_from_csv_slice(bytes: &[u8]) -> Result<Vec<String>, PrepError> {
    columns_from_reader(bytes, Path::new("<bytes>"))
}

fn columns_from_reader<R: std::io::Read>(reader: R, path: &Path) -> Result<Vec<String>, PrepError> {
    let csv_error = |source: csv::Error| PrepError::CsvParse {
        path: path.to_path_buf(),
        source,
    };

    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);
    let columns: Vec<String> = csv_reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(str::to_string)
        .collect();

    for record in csv_reader.records() {
        let record = record.map_err(csv_error)?;
        if record.len() > columns.len() {
            return Err(PrepError::CsvRecord {
                path: path.to_path_buf(),
                line: record.position().map_or(0, |pos| pos.line()),
                expected: columns.len(),
                found: record.len(),
            });
        }
    }

    Ok(dedup_columns(columns))
}

/// Renames repeated names to `name.1`, `name.2`, ..., skipping any suffixed
/// name that is already taken.
fn dedup_columns(columns: Vec<String>) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut unique = Vec::with_capacity(columns.len());
    for mut column in columns {
        let mut seen = counts.get(&column).copied().unwrap_or(0);
        while seen > 0 {
            counts.insert(column.clone(), seen + 1);
            column = format!("{}.{}", column, seen);
            seen = counts.get(&column).copied().unwrap_or(0);
        }
        counts.insert(column.clone(), seen + 1);
        unique.push(column);
    }
    unique
}
