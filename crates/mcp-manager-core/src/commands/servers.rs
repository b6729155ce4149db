//! Read-only views of the registry and the clear-all operation.

use std::path::PathBuf;

use serde::Serialize;
use serde_json::{Map, Value};

use super::McpManager;
use crate::error::Result;
use crate::process::RestartOutcome;

/// One registered server, as shown by `list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerSummary {
    pub name: String,
    pub command: String,
    pub args: Vec<String>,
    /// Number of environment overrides; `None` when the entry has no `env`.
    pub env_count: Option<usize>,
}

impl ServerSummary {
    /// Summarize a raw registry entry. Fields of an unexpected shape are
    /// shown as empty rather than rejected.
    fn from_entry(name: &str, entry: &Value) -> Self {
        let command = entry
            .get("command")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let args = entry
            .get("args")
            .and_then(Value::as_array)
            .map(|args| {
                args.iter()
                    .map(|arg| match arg {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        let env_count = entry.get("env").and_then(Value::as_object).map(Map::len);

        Self {
            name: name.to_string(),
            command,
            args,
            env_count,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub config_path: PathBuf,
    pub total: usize,
    pub names: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ClearOptions {
    pub restart: bool,
}

impl ClearOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_restart(mut self, restart: bool) -> Self {
        self.restart = restart;
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ClearReport {
    /// Number of entries removed; zero means nothing was touched.
    pub removed: usize,
    pub backup: Option<PathBuf>,
    pub restart: Option<RestartOutcome>,
}

impl McpManager {
    pub fn list(&self) -> Result<Vec<ServerSummary>> {
        let config = self.ctx.host_config_store().load()?;
        Ok(config
            .mcp_servers
            .iter()
            .map(|(name, entry)| ServerSummary::from_entry(name, entry))
            .collect())
    }

    pub fn status(&self) -> Result<StatusReport> {
        let config = self.ctx.host_config_store().load()?;
        let names = config.names();
        Ok(StatusReport {
            config_path: self.ctx.host_config_path().to_path_buf(),
            total: names.len(),
            names,
        })
    }

    /// Remove every registered server. An empty registry is left alone and
    /// no backup is taken.
    pub fn clear(&self, options: &ClearOptions) -> Result<ClearReport> {
        let store = self.ctx.host_config_store();
        let mut config = store.load()?;
        let removed = config.mcp_servers.len();

        if removed == 0 {
            return Ok(ClearReport {
                removed: 0,
                backup: None,
                restart: None,
            });
        }

        let backup = self.ctx.backup_store().create()?;
        config.mcp_servers.clear();
        store.save(&config)?;
        tracing::info!(removed, "cleared all servers");

        Ok(ClearReport {
            removed,
            backup: Some(backup),
            restart: self.restart_if(options.restart),
        })
    }
}
