#![allow(dead_code)]

use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use zip::write::SimpleFileOptions;

pub const WINE_CSV: &str = include_str!("../fixtures/winequality-red.csv");
pub const WINE_SCHEMA: &str = include_str!("../fixtures/schema.yaml");
pub const PARAMS: &str = include_str!("../fixtures/params.yaml");

/// A throwaway project directory with `config.yaml`, `params.yaml` and
/// `schema.yaml` whose artifact paths all live under the directory.
pub struct Project {
    pub dir: TempDir,
    pub config: PathBuf,
    pub params: PathBuf,
    pub schema: PathBuf,
}

impl Project {
    pub fn new(schema_yaml: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let root = dir.path().display().to_string();

        let config_yaml = format!(
            "artifacts_root: {root}/artifacts

data_ingestion:
  root_dir: {root}/artifacts/data_ingestion
  source_URL: http://127.0.0.1:9/winequality-data.zip
  local_data_file: {root}/artifacts/data_ingestion/data.zip
  unzip_dir: {root}/artifacts/data_ingestion

data_validation:
  root_dir: {root}/artifacts/data_validation
  unzip_data_dir: {root}/artifacts/data_ingestion/winequality-red.csv
  STATUS_FILE: {root}/artifacts/data_validation/status.txt
"
        );

        let config = dir.path().join("config.yaml");
        let params = dir.path().join("params.yaml");
        let schema = dir.path().join("schema.yaml");
        fs::write(&config, config_yaml).expect("write config");
        fs::write(&params, PARAMS).expect("write params");
        fs::write(&schema, schema_yaml).expect("write schema");

        Self {
            dir,
            config,
            params,
            schema,
        }
    }

    pub fn wine() -> Self {
        Self::new(WINE_SCHEMA)
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn archive(&self) -> PathBuf {
        self.root().join("artifacts/data_ingestion/data.zip")
    }

    pub fn data_csv(&self) -> PathBuf {
        self.root().join("artifacts/data_ingestion/winequality-red.csv")
    }

    pub fn status_file(&self) -> PathBuf {
        self.root().join("artifacts/data_validation/status.txt")
    }

    /// Places the dataset archive where ingestion expects it, so no download happens.
    pub fn write_archive(&self, entries: &[(&str, &str)]) {
        let archive = self.archive();
        fs::create_dir_all(archive.parent().expect("archive parent")).expect("create dirs");
        fs::write(archive, zip_bytes(entries)).expect("write archive");
    }

    /// Places an already extracted CSV file.
    pub fn write_csv(&self, csv: &str) {
        let path = self.data_csv();
        fs::create_dir_all(path.parent().expect("csv parent")).expect("create dirs");
        fs::write(path, csv).expect("write csv");
    }

    pub fn read_status(&self) -> String {
        fs::read_to_string(self.status_file()).expect("read status file")
    }
}

pub fn zip_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, contents) in entries {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .expect("start zip entry");
        writer
            .write_all(contents.as_bytes())
            .expect("write zip entry");
    }
    writer.finish().expect("finish zip").into_inner()
}
