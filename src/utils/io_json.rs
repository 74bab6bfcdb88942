//! JSON document reading and writing.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

use super::config_box::ConfigBox;
use crate::error::PrepError;

/// Writes `data` as JSON indented by four spaces.
///
/// # Errors
/// Returns an error if the file cannot be created or the value cannot be
/// serialized.
pub fn save_json<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<(), PrepError> {
    let file = File::create(path).map_err(|source| PrepError::io_at(path, source))?;
    let mut writer = BufWriter::new(file);

    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    data.serialize(&mut serializer)
        .map_err(|source| PrepError::JsonWrite {
            path: path.to_path_buf(),
            source,
        })?;
    writer
        .flush()
        .map_err(|source| PrepError::io_at(path, source))?;

    tracing::info!("json file saved at: {}", path.display());
    Ok(())
}

/// Reads a JSON object into a [`ConfigBox`].
///
/// # Errors
/// Returns an error if the file cannot be read, is not valid JSON, or its
/// top level is not an object.
pub fn load_json(path: &Path) -> Result<ConfigBox, PrepError> {
    let file = File::open(path).map_err(|source| PrepError::io_at(path, source))?;
    let reader = BufReader::new(file);

    let value: Value = serde_json::from_reader(reader).map_err(|source| PrepError::JsonParse {
        path: path.to_path_buf(),
        source,
    })?;
    let config = ConfigBox::from_value(value, path)?;

    tracing::info!("json file loaded successfully from: {}", path.display());
    Ok(config)
}
