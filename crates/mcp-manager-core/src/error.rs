//! Error types surfaced by manager operations.

use std::path::PathBuf;

/// Failures that abort a manager operation.
///
/// Every variant renders as a single human-readable line; frontends print it
/// and exit with a non-zero status.
#[derive(Debug, thiserror::Error)]
pub enum ManagerError {
    #[error("Failed to read config file {path}: {reason}")]
    ConfigRead { path: PathBuf, reason: String },

    #[error("Failed to write config file {path}: {source}")]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No config file to back up: {0}")]
    NoConfigToBackup(PathBuf),

    #[error("Failed to create backup {path}: {source}")]
    Backup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(".mcp-config.json not found in {0}")]
    MissingDescriptor(PathBuf),

    #[error("Invalid project descriptor {path}: {reason}")]
    InvalidDescriptor { path: PathBuf, reason: String },

    #[error("Failed to read manager settings {path}: {reason}")]
    SettingsRead { path: PathBuf, reason: String },

    #[error("Failed to write manager settings {path}: {source}")]
    SettingsWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("MCP server path is not configured. Set it with: mcp-manager config set-path <path>")]
    NotConfigured,

    #[error("Path does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("Script runner '{0}' not found on PATH. Is it installed?")]
    RunnerNotFound(String),

    #[error("Could not determine home directory")]
    HomeDirNotFound,

    #[error("Could not determine current directory: {0}")]
    CurrentDir(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ManagerError>;
