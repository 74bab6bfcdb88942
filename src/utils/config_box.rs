//! A loaded structured document with attribute-style access.
//!
//! `ConfigBox` wraps a JSON object map. Keys can be read directly
//! (`get("data_ingestion")`) or through a dotted path
//! (`path("data_ingestion.source_URL")`), which stands in for the
//! `config.data_ingestion.source_URL` style of access that dynamic
//! configuration objects offer. Key order follows the source document.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::PrepError;

/// A mapping loaded from a YAML or JSON document.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfigBox {
    origin: PathBuf,
    inner: Map<String, Value>,
}

impl ConfigBox {
    /// Wraps a parsed document. The top level must be a mapping.
    pub fn from_value(value: Value, origin: &Path) -> Result<Self, PrepError> {
        match value {
            Value::Object(inner) => Ok(Self {
                origin: origin.to_path_buf(),
                inner,
            }),
            other => Err(PrepError::InvalidConfig {
                path: origin.to_path_buf(),
                message: format!("expected a mapping at the top level, found {}", kind(&other)),
            }),
        }
    }

    /// The file this document was loaded from.
    pub fn origin(&self) -> &Path {
        &self.origin
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.inner.get(key)
    }

    /// Looks up a value by dotted path, e.g. `data_validation.STATUS_FILE`.
    pub fn path(&self, dotted: &str) -> Option<&Value> {
        let mut parts = dotted.split('.');
        let first = parts.next()?;
        let mut current = self.inner.get(first)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        Some(current)
    }

    /// Like [`ConfigBox::path`], but a missing key is an error naming the document.
    pub fn require(&self, dotted: &str) -> Result<&Value, PrepError> {
        self.path(dotted).ok_or_else(|| PrepError::MissingKey {
            path: self.origin.clone(),
            key: dotted.to_string(),
        })
    }

    /// Reads a required string value.
    pub fn require_str(&self, dotted: &str) -> Result<&str, PrepError> {
        self.require(dotted)?
            .as_str()
            .ok_or_else(|| PrepError::InvalidConfig {
                path: self.origin.clone(),
                message: format!("'{}' must be a string", dotted),
            })
    }

    /// Returns a nested mapping as its own box, keeping the origin.
    pub fn section(&self, dotted: &str) -> Result<ConfigBox, PrepError> {
        match self.require(dotted)? {
            Value::Object(map) => Ok(ConfigBox {
                origin: self.origin.clone(),
                inner: map.clone(),
            }),
            other => Err(PrepError::InvalidConfig {
                path: self.origin.clone(),
                message: format!("'{}' must be a mapping, found {}", dotted, kind(other)),
            }),
        }
    }

    /// Top-level keys in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Deserializes the whole document into a typed struct.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, PrepError> {
        serde_json::from_value(Value::Object(self.inner.clone())).map_err(|source| {
            PrepError::InvalidConfig {
                path: self.origin.clone(),
                message: source.to_string(),
            }
        })
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.inner
    }
}

impl fmt::Display for ConfigBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::Object(self.inner.clone()))
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    fn sample() -> ConfigBox {
        let value = json!({
            "artifacts_root": "artifacts",
            "data_ingestion": {
                "root_dir": "artifacts/data_ingestion",
                "source_URL": "https://example.com/data.zip"
            },
            "depth": { "one": { "two": 2 } }
        });
        ConfigBox::from_value(value, Path::new("config.yaml")).unwrap()
    }

    #[test]
    fn dotted_path_reaches_nested_values() {
        let config = sample();
        assert_eq!(
            config.path("data_ingestion.source_URL").and_then(Value::as_str),
            Some("https://example.com/data.zip")
        );
        assert_eq!(config.path("depth.one.two"), Some(&json!(2)));
        assert!(config.path("depth.one.three").is_none());
        assert!(config.path("artifacts_root.nested").is_none());
    }

    #[test]
    fn require_reports_missing_key_with_origin() {
        let err = sample().require("data_validation.root_dir").unwrap_err();
        match err {
            PrepError::MissingKey { path, key } => {
                assert_eq!(path, PathBuf::from("config.yaml"));
                assert_eq!(key, "data_validation.root_dir");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn top_level_must_be_mapping() {
        let err = ConfigBox::from_value(json!([1, 2]), Path::new("list.yaml")).unwrap_err();
        assert!(err.to_string().contains("a sequence"));
    }

    #[test]
    fn section_keeps_origin_and_rejects_scalars() {
        let config = sample();
        let section = config.section("data_ingestion").unwrap();
        assert_eq!(section.origin(), Path::new("config.yaml"));
        assert_eq!(section.require_str("root_dir").unwrap(), "artifacts/data_ingestion");
        assert!(config.section("artifacts_root").is_err());
    }

    #[test]
    fn keys_follow_document_order() {
        let config = sample();
        let keys: Vec<&str> = config.keys().collect();
        assert_eq!(keys, vec!["artifacts_root", "data_ingestion", "depth"]);
    }

    #[test]
    fn deserializes_into_typed_struct() {
        #[derive(Deserialize)]
        struct Ingestion {
            root_dir: String,
            #[serde(rename = "source_URL")]
            source_url: String,
        }

        let ingestion: Ingestion = sample().section("data_ingestion").unwrap().deserialize().unwrap();
        assert_eq!(ingestion.root_dir, "artifacts/data_ingestion");
        assert_eq!(ingestion.source_url, "https://example.com/data.zip");
    }
}
