//! Data ingestion: fetch the dataset archive and unpack it.
//!
//! The download is skipped when the archive already exists locally, so a
//! pipeline can be re-run without touching the network. Extraction always
//! runs and overwrites whatever was unpacked before.

mod transport;

pub use transport::{FetchInfo, HttpTransport, Transport};

use std::fs::{self, File};
use std::io::{self, BufReader};

use crate::config::DataIngestionConfig;
use crate::error::PrepError;
use crate::utils::get_size;

/// Download-then-extract stage component.
pub struct DataIngestion<T: Transport = HttpTransport> {
    config: DataIngestionConfig,
    transport: T,
}

impl<T: Transport> DataIngestion<T> {
    pub fn with_transport(config: DataIngestionConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &DataIngestionConfig {
        &self.config
    }

    /// Downloads the archive unless `local_data_file` already exists.
    ///
    /// Returns `Some` with the transfer summary if a download happened.
    /// Transport errors are returned as-is; there is no retry.
    pub fn download_file(&self) -> Result<Option<FetchInfo>, PrepError> {
        let dest = &self.config.local_data_file;
        if dest.exists() {
            let size = get_size(dest)?;
            tracing::info!("file already exists of size: {}", size);
            return Ok(None);
        }

        let info = self.transport.fetch(&self.config.source_url, dest)?;
        tracing::info!(
            status = info.status,
            content_type = info.content_type.as_deref().unwrap_or("unknown"),
            content_length = ?info.content_length,
            bytes = info.bytes_written,
            "{} downloaded from {}",
            dest.display(),
            self.config.source_url
        );
        Ok(Some(info))
    }

    /// Extracts every entry of the archive into `unzip_dir`.
    ///
    /// Creates `unzip_dir` if needed and overwrites existing files. Entries
    /// whose names would escape `unzip_dir` are skipped. Returns the number of
    /// files written.
    pub fn extract_zip_file(&self) -> Result<usize, PrepError> {
        let archive_path = &self.config.local_data_file;
        let unzip_dir = &self.config.unzip_dir;
        fs::create_dir_all(unzip_dir).map_err(|source| PrepError::io_at(unzip_dir, source))?;

        let zip_error = |source: zip::result::ZipError| PrepError::Zip {
            path: archive_path.clone(),
            source,
        };

        let file = File::open(archive_path).map_err(|source| PrepError::io_at(archive_path, source))?;
        let mut archive = zip::ZipArchive::new(BufReader::new(file)).map_err(zip_error)?;

        let mut extracted = 0;
        for index in 0..archive.len() {
            let mut entry = archive.by_index(index).map_err(zip_error)?;
            let Some(relative) = entry.enclosed_name() else {
                tracing::warn!("skipping archive entry with unsafe path: {}", entry.name());
                continue;
            };
            let out_path = unzip_dir.join(relative);

            if entry.is_dir() {
                fs::create_dir_all(&out_path).map_err(|source| PrepError::io_at(&out_path, source))?;
                continue;
            }

            if let Some(parent) = out_path.parent() {
                fs::create_dir_all(parent).map_err(|source| PrepError::io_at(parent, source))?;
            }
            let mut out = File::create(&out_path).map_err(|source| PrepError::io_at(&out_path, source))?;
            io::copy(&mut entry, &mut out).map_err(|source| PrepError::io_at(&out_path, source))?;
            extracted += 1;
        }

        tracing::info!(
            "extracted {} file(s) from {} into {}",
            extracted,
            archive_path.display(),
            unzip_dir.display()
        );
        Ok(extracted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::io::Write;
    use std::path::{Path, PathBuf};

    use tempfile::tempdir;
    use url::Url;
    use zip::write::SimpleFileOptions;

    /// Writes a fixed archive and counts how often it was asked to.
    struct FakeTransport {
        body: Vec<u8>,
        calls: Cell<usize>,
    }

    impl Transport for FakeTransport {
        fn fetch(&self, _url: &Url, dest: &Path) -> Result<FetchInfo, PrepError> {
            self.calls.set(self.calls.get() + 1);
            fs::write(dest, &self.body).map_err(|source| PrepError::io_at(dest, source))?;
            Ok(FetchInfo {
                status: 200,
                content_type: Some("application/zip".into()),
                content_length: Some(self.body.len() as u64),
                bytes_written: self.body.len() as u64,
            })
        }
    }

    struct FailingTransport;

    impl Transport for FailingTransport {
        fn fetch(&self, url: &Url, _dest: &Path) -> Result<FetchInfo, PrepError> {
            Err(PrepError::Download {
                url: url.to_string(),
                message: "connection refused".into(),
            })
        }
    }

    fn zip_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(io::Cursor::new(Vec::new()));
        for (name, contents) in entries {
            if name.ends_with('/') {
                writer.add_directory(*name, SimpleFileOptions::default()).unwrap();
            } else {
                writer.start_file(*name, SimpleFileOptions::default()).unwrap();
                writer.write_all(contents.as_bytes()).unwrap();
            }
        }
        writer.finish().unwrap().into_inner()
    }

    fn config(root: &Path) -> DataIngestionConfig {
        DataIngestionConfig {
            root_dir: root.to_path_buf(),
            source_url: Url::parse("https://example.com/winequality-data.zip").unwrap(),
            local_data_file: root.join("data.zip"),
            unzip_dir: root.join("unzipped"),
        }
    }

    #[test]
    fn download_runs_only_when_file_is_absent() {
        let dir = tempdir().unwrap();
        let transport = FakeTransport {
            body: zip_bytes(&[("winequality-red.csv", "a,b\n1,2\n")]),
            calls: Cell::new(0),
        };
        let ingestion = DataIngestion::with_transport(config(dir.path()), transport);

        let first = ingestion.download_file().unwrap();
        assert_eq!(first.map(|info| info.status), Some(200));
        assert!(ingestion.download_file().unwrap().is_none());
        assert_eq!(ingestion.transport.calls.get(), 1);
    }

    #[test]
    fn transport_errors_propagate() {
        let dir = tempdir().unwrap();
        let ingestion = DataIngestion::with_transport(config(dir.path()), FailingTransport);
        let err = ingestion.download_file().unwrap_err();
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn extraction_is_repeatable() {
        let dir = tempdir().unwrap();
        let cfg = config(dir.path());
        fs::write(
            &cfg.local_data_file,
            zip_bytes(&[
                ("winequality-red.csv", "a,b\n1,2\n"),
                ("docs/", ""),
                ("docs/readme.txt", "wine"),
            ]),
        )
        .unwrap();
        let ingestion = DataIngestion::with_transport(cfg.clone(), FailingTransport);

        assert_eq!(ingestion.extract_zip_file().unwrap(), 2);
        let first = list_files(&cfg.unzip_dir);
        assert_eq!(ingestion.extract_zip_file().unwrap(), 2);
        assert_eq!(list_files(&cfg.unzip_dir), first);
        assert_eq!(
            fs::read_to_string(cfg.unzip_dir.join("docs/readme.txt")).unwrap(),
            "wine"
        );
    }

    #[test]
    fn corrupt_archive_is_a_zip_error() {
        let dir = tempdir().unwrap();
        let cfg = config(dir.path());
        fs::write(&cfg.local_data_file, b"definitely not a zip").unwrap();
        let ingestion = DataIngestion::with_transport(cfg, FailingTransport);
        assert!(matches!(
            ingestion.extract_zip_file().unwrap_err(),
            PrepError::Zip { .. }
        ));
    }

    #[test]
    fn entries_escaping_unzip_dir_are_skipped() {
        let dir = tempdir().unwrap();
        let cfg = config(dir.path());
        fs::write(
            &cfg.local_data_file,
            zip_bytes(&[
                ("winequality-red.csv", "a,b\n1,2\n"),
                ("../evil.txt", "outside"),
            ]),
        )
        .unwrap();
        let ingestion = DataIngestion::with_transport(cfg.clone(), FailingTransport);

        assert_eq!(ingestion.extract_zip_file().unwrap(), 1);
        assert!(!dir.path().join("evil.txt").exists());
        assert_eq!(list_files(&cfg.unzip_dir), vec![PathBuf::from("winequality-red.csv")]);
    }

    fn list_files(root: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = walkdir::WalkDir::new(root)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.path().strip_prefix(root).unwrap().to_path_buf())
            .collect();
        files.sort();
        files
    }
}
