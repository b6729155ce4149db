//! Persistence for the three JSON documents the manager touches:
//! - the host application's server registry (plus its backups)
//! - each project's `.mcp-config.json` descriptor
//! - the manager's own settings

pub mod backup;
pub mod host;
mod json;
pub mod project;
pub mod settings;

pub use backup::{BackupStore, DEFAULT_BACKUP_RETENTION};
pub use host::{HostAppConfig, HostConfigStore, ServerEntry};
pub use project::{DESCRIPTOR_FILE, ProjectDescriptor};
pub use settings::{ManagerSettings, SettingsStore};
