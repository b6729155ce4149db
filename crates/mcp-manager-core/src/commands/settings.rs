//! Reading and updating the manager's own settings.

use std::path::PathBuf;

use serde::Serialize;

use super::McpManager;
use crate::error::{ManagerError, Result};

#[derive(Debug, Clone, Serialize)]
pub struct SettingsReport {
    pub settings_path: PathBuf,
    /// `None` when no server path has been set
    pub server_path: Option<PathBuf>,
    /// Whether `server_path` currently exists on disk
    pub exists: bool,
}

impl McpManager {
    /// Store `input` as the shared MCP server path and return the
    /// normalized path that was saved.
    pub fn set_server_path(&self, input: &str) -> Result<PathBuf> {
        let path = self.ctx.normalize(input);
        if !path.exists() {
            return Err(ManagerError::PathNotFound(path));
        }

        let store = self.ctx.settings_store();
        let mut settings = store.load()?.unwrap_or_default();
        settings.mcp_server_path = path.to_string_lossy().to_string();
        store.save(&settings)?;
        tracing::info!(path = %path.display(), "saved MCP server path");

        Ok(path)
    }

    pub fn show_settings(&self) -> Result<SettingsReport> {
        let store = self.ctx.settings_store();
        let server_path = store
            .load()?
            .and_then(|settings| settings.server_path().map(|p| p.to_path_buf()));
        let exists = server_path.as_ref().is_some_and(|p| p.exists());

        Ok(SettingsReport {
            settings_path: store.path().to_path_buf(),
            server_path,
            exists,
        })
    }
}
