//! Directory creation and size reporting.

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::PrepError;

/// Creates every directory in `paths` (and its parents) if missing.
///
/// Existing directories are left alone. With `verbose`, each path is logged.
pub fn create_directories<P: AsRef<Path>>(paths: &[P], verbose: bool) -> Result<(), PrepError> {
    for path in paths {
        let path = path.as_ref();
        fs::create_dir_all(path).map_err(|source| PrepError::io_at(path, source))?;
        if verbose {
            tracing::info!("created directory at: {}", path.display());
        }
    }
    Ok(())
}

/// Returns the approximate size of a file, or of all files under a
/// directory, formatted as `~ N KB`.
///
/// N is the size in KiB rounded half-to-even, so 512 bytes reports `~ 0 KB`
/// and 1536 bytes reports `~ 2 KB`.
pub fn get_size(path: &Path) -> Result<String, PrepError> {
    let metadata = fs::metadata(path).map_err(|source| PrepError::io_at(path, source))?;

    let bytes = if metadata.is_dir() {
        let mut total = 0u64;
        for entry in WalkDir::new(path) {
            let entry = entry.map_err(|err| {
                let at = err.path().unwrap_or(path).to_path_buf();
                PrepError::io_at(at, err.into())
            })?;
            if entry.file_type().is_file() {
                let len = entry
                    .metadata()
                    .map_err(|err| PrepError::io_at(entry.path(), err.into()))?
                    .len();
                total += len;
            }
        }
        total
    } else {
        metadata.len()
    };

    Ok(format_kb(bytes))
}

fn format_kb(bytes: u64) -> String {
    let kb = (bytes as f64 / 1024.0).round_ties_even();
    format!("~ {} KB", kb as u64)
}
