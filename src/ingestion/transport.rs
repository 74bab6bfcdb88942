//! HTTP download transport.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use url::Url;

use crate::error::PrepError;

/// Summary of a completed download, logged by the ingestion stage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FetchInfo {
    pub status: u16,
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
    pub bytes_written: u64,
}

/// Fetches a remote resource into a local file.
pub trait Transport {
    fn fetch(&self, url: &Url, dest: &Path) -> Result<FetchInfo, PrepError>;
}

/// Blocking HTTP(S) transport backed by `ureq`.
#[derive(Clone)]
pub struct HttpTransport {
    agent: ureq::Agent,
}

impl HttpTransport {
    pub fn new() -> Self {
        let config = ureq::Agent::config_builder().build();
        Self {
            agent: config.into(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpTransport {
    fn fetch(&self, url: &Url, dest: &Path) -> Result<FetchInfo, PrepError> {
        let download_error = |message: String| PrepError::Download {
            url: url.to_string(),
            message,
        };

        let mut response = self
            .agent
            .get(url.as_str())
            .call()
            .map_err(|source| download_error(source.to_string()))?;

        let header = |name: &str| {
            response
                .headers()
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        };
        let content_type = header("content-type");
        let content_length = header("content-length").and_then(|value| value.parse().ok());
        let status = response.status().as_u16();

        let file = File::create(dest).map_err(|source| PrepError::io_at(dest, source))?;
        let mut writer = BufWriter::new(file);
        let mut reader = response.body_mut().as_reader();
        let bytes_written = io::copy(&mut reader, &mut writer)
            .map_err(|source| download_error(source.to_string()))?;
        writer
            .flush()
            .map_err(|source| PrepError::io_at(dest, source))?;

        Ok(FetchInfo {
            status,
            content_type,
            content_length,
            bytes_written,
        })
    }
}
