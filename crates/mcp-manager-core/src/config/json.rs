//! Shared JSON file load/save helpers.

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Read and deserialize `path`. Returns `Ok(None)` when the file does not
/// exist; any other failure is returned as a display-ready reason.
pub(crate) fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let bytes = std::fs::read(path).map_err(|e| e.to_string())?;
    let value = serde_json::from_slice(&bytes).map_err(|e| format!("invalid JSON: {e}"))?;
    Ok(Some(value))
}

/// Serialize `value` with 2-space indentation and write it to `path`,
/// creating parent directories as needed.
pub(crate) fn save_json<T: Serialize>(
    path: &Path,
    value: &T,
    trailing_newline: bool,
) -> std::io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let mut content = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
    if trailing_newline {
        content.push('\n');
    }
    std::fs::write(path, content)
}
