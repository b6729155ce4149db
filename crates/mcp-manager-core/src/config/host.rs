//! Host application server registry (`claude_desktop_config.json`).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::json::{load_json, save_json};
use crate::error::{ManagerError, Result};

/// How the host application launches one MCP server process.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerEntry {
    #[serde(default)]
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<BTreeMap<String, String>>,
    /// Fields this tool does not manage, kept as found.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ServerEntry {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
            env: None,
            extra: Map::new(),
        }
    }

    pub fn with_env(mut self, env: BTreeMap<String, String>) -> Self {
        self.env = Some(env);
        self
    }
}

/// Parsed host config document.
///
/// Registry entries stay raw JSON: entries written by other tools may use
/// other transports or non-string values and are written back as found.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostAppConfig {
    #[serde(rename = "mcpServers", default)]
    pub mcp_servers: Map<String, Value>,
    /// Other top-level settings of the host application.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl HostAppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.mcp_servers.contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.mcp_servers.keys().cloned().collect()
    }

    /// Insert (or replace) the entry for `name`.
    pub fn insert_entry(
        &mut self,
        name: impl Into<String>,
        entry: &ServerEntry,
    ) -> serde_json::Result<()> {
        let value = serde_json::to_value(entry)?;
        self.mcp_servers.insert(name.into(), value);
        Ok(())
    }
}

/// Loads and saves the host config at a fixed path.
#[derive(Debug, Clone)]
pub struct HostConfigStore {
    path: PathBuf,
}

impl HostConfigStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Missing file means first run: an empty registry, not an error.
    pub fn load(&self) -> Result<HostAppConfig> {
        match load_json::<HostAppConfig>(&self.path) {
            Ok(Some(config)) => Ok(config),
            Ok(None) => {
                tracing::debug!(path = %self.path.display(), "host config absent, using empty registry");
                Ok(HostAppConfig::new())
            }
            Err(reason) => Err(ManagerError::ConfigRead {
                path: self.path.clone(),
                reason,
            }),
        }
    }

    pub fn save(&self, config: &HostAppConfig) -> Result<()> {
        save_json(&self.path, config, false).map_err(|source| ManagerError::ConfigWrite {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(
            path = %self.path.display(),
            servers = config.mcp_servers.len(),
            "wrote host config"
        );
        Ok(())
    }
}
