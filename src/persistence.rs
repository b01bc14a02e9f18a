//! JSON state files
//!
//! A missing file is a first run, not an error. A file that exists but does
//! not parse is reported as `CorruptState` so startup can stop instead of
//! silently regenerating state.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::{AutowarError, Result};

/// Read `path` as JSON, returning `None` when the file does not exist
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }

    tracing::debug!("Reading {:?}", path);
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| AutowarError::CorruptState {
            path: path.to_path_buf(),
            source,
        })
}

/// Write `value` to `path` as JSON, replacing any previous content
///
/// The data goes to a sibling temp file first and is renamed into place, so
/// a crash mid-write leaves the old file intact.
pub fn save_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let data = serde_json::to_string_pretty(value)?;
    let tmp = temp_path(path);
    fs::write(&tmp, data)?;
    fs::rename(&tmp, path)?;
    tracing::debug!("Saved {:?}", path);
    Ok(())
}

/// Write `value` only if nothing exists at `path` yet
pub fn save_json_if_absent<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    save_json(path, value)?;
    Ok(true)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
