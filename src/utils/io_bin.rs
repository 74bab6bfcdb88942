//! Binary artifact persistence.
//!
//! Objects are stored in a protobuf envelope:
//!
//! | tag | field            | contents                                  |
//! |-----|------------------|-------------------------------------------|
//! | 1   | `format_version` | currently `1`                             |
//! | 2   | `type_name`      | Rust type name of the saved value         |
//! | 3   | `payload`        | the value serialized with `serde_json`    |
//! | 4   | `checksum`       | CRC32C of `payload`, checked on load      |
//!
//! The type name is informational; loading into a different type succeeds as
//! long as the payload deserializes.

use std::fs;
use std::path::Path;

use prost::Message;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::PrepError;

const FORMAT_VERSION: u32 = 1;

#[derive(Clone, PartialEq, Message)]
struct BinEnvelope {
    #[prost(uint32, tag = "1")]
    format_version: u32,
    #[prost(string, tag = "2")]
    type_name: String,
    #[prost(bytes = "vec", tag = "3")]
    payload: Vec<u8>,
    #[prost(fixed32, tag = "4")]
    checksum: u32,
}

/// Saves any serializable value as a binary artifact.
pub fn save_bin<T: Serialize + ?Sized>(data: &T, path: &Path) -> Result<(), PrepError> {
    let payload = serde_json::to_vec(data).map_err(|source| PrepError::BinEncode {
        path: path.to_path_buf(),
        message: source.to_string(),
    })?;

    let envelope = BinEnvelope {
        format_version: FORMAT_VERSION,
        type_name: std::any::type_name::<T>().to_string(),
        checksum: crc32c::crc32c(&payload),
        payload,
    };

    fs::write(path, envelope.encode_to_vec()).map_err(|source| PrepError::io_at(path, source))?;
    tracing::info!("binary file saved at: {}", path.display());
    Ok(())
}

/// Loads a value previously written by [`save_bin`].
///
/// # Errors
/// Returns [`PrepError::BinChecksum`] if the payload was altered, and
/// [`PrepError::BinDecode`] for a corrupt envelope, an unknown format
/// version, or a payload that does not fit `T`.
pub fn load_bin<T: DeserializeOwned>(path: &Path) -> Result<T, PrepError> {
    let bytes = fs::read(path).map_err(|source| PrepError::io_at(path, source))?;
    let envelope = BinEnvelope::decode(bytes.as_slice()).map_err(|source| PrepError::BinDecode {
        path: path.to_path_buf(),
        message: source.to_string(),
    })?;

    if envelope.format_version != FORMAT_VERSION {
        return Err(PrepError::BinDecode {
            path: path.to_path_buf(),
            message: format!("unsupported format version {}", envelope.format_version),
        });
    }

    let actual = crc32c::crc32c(&envelope.payload);
    if actual != envelope.checksum {
        return Err(PrepError::BinChecksum {
            path: path.to_path_buf(),
            expected: envelope.checksum,
            actual,
        });
    }

    let data = serde_json::from_slice(&envelope.payload).map_err(|source| PrepError::BinDecode {
        path: path.to_path_buf(),
        message: format!("payload saved as {}: {}", envelope.type_name, source),
    })?;

    tracing::info!("binary file loaded from: {}", path.display());
    Ok(data)
}
