//! Adding and removing a project's server entry.

use std::path::PathBuf;

use serde::Serialize;

use super::McpManager;
use crate::config::ProjectDescriptor;
use crate::error::{ManagerError, Result};
use crate::process::RestartOutcome;

/// Options for [`McpManager::add`].
#[derive(Debug, Clone, Default)]
pub struct AddOptions {
    /// Restart the host application once the entry is written.
    pub restart: bool,
}

impl AddOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_restart(mut self, restart: bool) -> Self {
        self.restart = restart;
        self
    }
}

/// Report from an add operation
#[derive(Debug, Clone, Serialize)]
pub struct AddReport {
    /// Server name taken from the project descriptor
    pub name: String,
    pub project_path: PathBuf,
    /// `false` when the name was already registered
    pub changed: bool,
    pub backup: Option<PathBuf>,
    /// Present only when a restart was requested and the entry was added
    pub restart: Option<RestartOutcome>,
    /// Non-fatal problems, e.g. a skipped backup
    pub warnings: Vec<String>,
}

/// Options for [`McpManager::remove`].
#[derive(Debug, Clone, Default)]
pub struct RemoveOptions {
    pub restart: bool,
}

impl RemoveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_restart(mut self, restart: bool) -> Self {
        self.restart = restart;
        self
    }
}

/// Report from a remove operation
#[derive(Debug, Clone, Serialize)]
pub struct RemoveReport {
    pub name: String,
    pub project_path: PathBuf,
    /// `false` when the name was not registered
    pub changed: bool,
    pub backup: Option<PathBuf>,
    pub restart: Option<RestartOutcome>,
}

impl McpManager {
    /// Register the server declared by the descriptor in `project_path`.
    ///
    /// An already registered name is left untouched. A failed backup does
    /// not stop the add; on first run there is no config to back up.
    pub fn add(&self, project_path: &str, options: &AddOptions) -> Result<AddReport> {
        let project_path = self.ctx.normalize(project_path);
        let descriptor = ProjectDescriptor::load(&project_path)?;
        let name = descriptor.name.clone();

        let store = self.ctx.host_config_store();
        let mut config = store.load()?;

        if config.contains(&name) {
            tracing::info!(%name, "server already registered");
            return Ok(AddReport {
                name,
                project_path,
                changed: false,
                backup: None,
                restart: None,
                warnings: Vec::new(),
            });
        }

        let mut warnings = Vec::new();
        let backup = match self.ctx.backup_store().create() {
            Ok(path) => Some(path),
            Err(err) => {
                tracing::info!(error = %err, "skipping backup");
                warnings.push(format!("Backup skipped: {err}"));
                None
            }
        };

        config
            .insert_entry(name.clone(), &descriptor.config)
            .map_err(|err| ManagerError::ConfigWrite {
                path: store.path().to_path_buf(),
                source: std::io::Error::other(err),
            })?;
        store.save(&config)?;
        tracing::info!(%name, "registered server");

        Ok(AddReport {
            name,
            project_path,
            changed: true,
            backup,
            restart: self.restart_if(options.restart),
            warnings,
        })
    }

    /// Unregister the server declared by the descriptor in `project_path`.
    ///
    /// Unlike [`McpManager::add`], the backup is mandatory: the entry exists,
    /// so the config file must too.
    pub fn remove(&self, project_path: &str, options: &RemoveOptions) -> Result<RemoveReport> {
        let project_path = self.ctx.normalize(project_path);
        let descriptor = ProjectDescriptor::load(&project_path)?;
        let name = descriptor.name;

        let store = self.ctx.host_config_store();
        let mut config = store.load()?;

        if !config.contains(&name) {
            tracing::info!(%name, "server not registered");
            return Ok(RemoveReport {
                name,
                project_path,
                changed: false,
                backup: None,
                restart: None,
            });
        }

        let backup = self.ctx.backup_store().create()?;

        config.mcp_servers.remove(&name);
        store.save(&config)?;
        tracing::info!(%name, "unregistered server");

        Ok(RemoveReport {
            name,
            project_path,
            changed: true,
            backup: Some(backup),
            restart: self.restart_if(options.restart),
        })
    }
}
