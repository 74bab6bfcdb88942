//! YAML document loading.

use std::fs;
use std::path::Path;

use serde_json::Value;

use super::config_box::ConfigBox;
use crate::error::PrepError;

/// Reads a YAML file into a [`ConfigBox`].
///
/// # Errors
/// Returns [`PrepError::EmptyYaml`] if the document is empty (or parses to
/// null), [`PrepError::YamlParse`] if it is malformed, and
/// [`PrepError::InvalidConfig`] if the top level is not a mapping.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use winedata::utils::read_yaml;
///
/// let schema = read_yaml(Path::new("schema.yaml"))?;
/// assert!(schema.contains_key("COLUMNS"));
/// # Ok::<(), winedata::PrepError>(())
/// ```
pub fn read_yaml(path: &Path) -> Result<ConfigBox, PrepError> {
    let text = fs::read_to_string(path).map_err(|source| PrepError::io_at(path, source))?;
    let config = from_yaml_str(&text, path)?;
    tracing::info!("yaml file: {} loaded successfully", path.display());
    Ok(config)
}

/// Parses YAML text into a [`ConfigBox`], attributing errors to `origin`.
///
/// Useful for testing and fuzzing without file I/O.
pub fn from_yaml_str(text: &str, origin: &Path) -> Result<ConfigBox, PrepError> {
    if text.trim().is_empty() {
        return Err(PrepError::EmptyYaml {
            path: origin.to_path_buf(),
        });
    }

    let value: Value = serde_yaml::from_str(text).map_err(|source| PrepError::YamlParse {
        path: origin.to_path_buf(),
        source,
    })?;

    if value.is_null() {
        return Err(PrepError::EmptyYaml {
            path: origin.to_path_buf(),
        });
    }

    ConfigBox::from_value(value, origin)
}
