//! Per-project descriptor (`.mcp-config.json`).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::host::ServerEntry;
use super::json::{load_json, save_json};
use crate::error::{ManagerError, Result};

pub const DESCRIPTOR_FILE: &str = ".mcp-config.json";

/// The one server entry a project contributes to the host registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDescriptor {
    pub name: String,
    pub config: ServerEntry,
}

impl ProjectDescriptor {
    pub fn path_in(project_dir: &Path) -> PathBuf {
        project_dir.join(DESCRIPTOR_FILE)
    }

    /// Load and validate the descriptor in `project_dir`.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let path = Self::path_in(project_dir);
        let value: Value = match load_json(&path) {
            Ok(Some(value)) => value,
            Ok(None) => return Err(ManagerError::MissingDescriptor(project_dir.to_path_buf())),
            Err(reason) => return Err(ManagerError::InvalidDescriptor { path, reason }),
        };

        if let Err(reason) = validate(&value) {
            return Err(ManagerError::InvalidDescriptor { path, reason });
        }

        serde_json::from_value(value).map_err(|e| ManagerError::InvalidDescriptor {
            path,
            reason: e.to_string(),
        })
    }

    pub fn save(&self, project_dir: &Path) -> Result<PathBuf> {
        let path = Self::path_in(project_dir);
        save_json(&path, self, true).map_err(|source| ManagerError::ConfigWrite {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

fn validate(value: &Value) -> std::result::Result<(), String> {
    let root = value
        .as_object()
        .ok_or_else(|| "expected a JSON object".to_string())?;

    match root.get("name").and_then(Value::as_str) {
        Some(name) if !name.is_empty() => {}
        _ => return Err("missing required field 'name'".to_string()),
    }

    let config = root
        .get("config")
        .and_then(Value::as_object)
        .ok_or_else(|| "missing required field 'config'".to_string())?;

    match config.get("command").and_then(Value::as_str) {
        Some(command) if !command.is_empty() => {}
        _ => return Err("missing required field 'config.command'".to_string()),
    }

    if !config.get("args").is_some_and(Value::is_array) {
        return Err("missing required field 'config.args'".to_string());
    }

    Ok(())
}
