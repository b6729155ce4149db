//! Project initialization: writing a fresh `.mcp-config.json`.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use super::McpManager;
use crate::config::{ProjectDescriptor, ServerEntry};
use crate::error::Result;
use crate::fs::dir_basename;

pub const ENV_SERVER_ROOT: &str = "SERVER_ROOT";
pub const ENV_MCP_MODE: &str = "MCP_MODE";
pub const ENV_PROJECT_ID: &str = "PROJECT_ID";
pub const STDIO_MODE: &str = "stdio";

#[derive(Debug, Clone, Serialize)]
pub struct InitReport {
    pub project_name: String,
    pub descriptor_path: PathBuf,
    /// `false` when a descriptor already existed and was left in place
    pub changed: bool,
    /// The descriptor that was written
    pub descriptor: Option<ProjectDescriptor>,
}

impl McpManager {
    /// Create `.mcp-config.json` in the working directory, pointing the
    /// local runner at the configured shared server.
    pub fn init_project(&self) -> Result<InitReport> {
        let project_dir = self.ctx.current_dir().to_path_buf();
        let project_name = dir_basename(&project_dir);
        let descriptor_path = ProjectDescriptor::path_in(&project_dir);

        if descriptor_path.exists() {
            tracing::info!(path = %descriptor_path.display(), "descriptor already exists");
            return Ok(InitReport {
                project_name,
                descriptor_path,
                changed: false,
                descriptor: None,
            });
        }

        let runner = self.ctx.runner().locate(&project_dir)?;
        let server_path = self.ctx.settings_store().ensure_server_path_configured()?;

        let env = BTreeMap::from([
            (
                ENV_SERVER_ROOT.to_string(),
                project_dir.to_string_lossy().to_string(),
            ),
            (ENV_MCP_MODE.to_string(), STDIO_MODE.to_string()),
            (ENV_PROJECT_ID.to_string(), project_name.clone()),
        ]);
        let descriptor = ProjectDescriptor {
            name: project_name.clone(),
            config: ServerEntry::new(
                runner.to_string_lossy(),
                vec![server_path.to_string_lossy().to_string()],
            )
            .with_env(env),
        };

        let descriptor_path = descriptor.save(&project_dir)?;
        tracing::info!(path = %descriptor_path.display(), "wrote project descriptor");

        Ok(InitReport {
            project_name,
            descriptor_path,
            changed: true,
            descriptor: Some(descriptor),
        })
    }
}
