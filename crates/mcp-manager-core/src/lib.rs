//! mcp-manager core library
//!
//! Registers per-project MCP servers in the Claude Desktop config, keeps
//! backups of that config, and restarts the desktop application on request.

pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod fs;
pub mod paths;
pub mod process;
pub mod runner;

/// Re-exports of commonly used types
pub mod prelude {
    // Configuration
    pub use crate::config::{
        BackupStore, DEFAULT_BACKUP_RETENTION, HostAppConfig, HostConfigStore, ManagerSettings,
        ProjectDescriptor, ServerEntry, SettingsStore,
    };

    // Commands
    pub use crate::commands::{
        AddOptions, AddReport, CleanReport, ClearOptions, ClearReport, InitReport, McpManager,
        RemoveOptions, RemoveReport, ServerSummary, SettingsReport, StatusReport,
    };

    // Context
    pub use crate::context::AppContext;
    pub use crate::error::{ManagerError, Result};
    pub use crate::paths::{EnvDirs, HostOs, PlatformPaths};
    pub use crate::runner::RunnerLocator;

    // Process
    pub use crate::process::{
        Clock, ProcessController, RestartOutcome, RestartTimings, StopSignal, SystemClock,
    };
}
