//! The manager's own persisted settings.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::json::{load_json, save_json};
use crate::error::{ManagerError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerSettings {
    /// Shared MCP server script every project descriptor points at.
    #[serde(rename = "mcpServerPath", default)]
    pub mcp_server_path: String,
}

impl ManagerSettings {
    pub fn server_path(&self) -> Option<&Path> {
        if self.mcp_server_path.is_empty() {
            None
        } else {
            Some(Path::new(&self.mcp_server_path))
        }
    }
}

/// Loads and saves the settings file.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when no settings have been saved yet.
    pub fn load(&self) -> Result<Option<ManagerSettings>> {
        load_json(&self.path).map_err(|reason| ManagerError::SettingsRead {
            path: self.path.clone(),
            reason,
        })
    }

    pub fn save(&self, settings: &ManagerSettings) -> Result<()> {
        save_json(&self.path, settings, false).map_err(|source| ManagerError::SettingsWrite {
            path: self.path.clone(),
            source,
        })
    }

    /// The configured server path, verified to exist on disk.
    pub fn ensure_server_path_configured(&self) -> Result<PathBuf> {
        let settings = self.load()?.ok_or(ManagerError::NotConfigured)?;
        let path = settings
            .server_path()
            .ok_or(ManagerError::NotConfigured)?
            .to_path_buf();

        if !path.exists() {
            return Err(ManagerError::PathNotFound(path));
        }
        Ok(path)
    }
}
