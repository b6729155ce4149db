//! Platform path resolution for the host config, its backups and the
//! manager's own settings file.
//!
//! Everything here is a pure function of the host OS and the environment
//! directories handed in; nothing touches the file system.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const HOST_CONFIG_FILE: &str = "claude_desktop_config.json";
pub const SETTINGS_FILE: &str = "config.json";
pub const SETTINGS_DIR_NAME: &str = "mcp-manager";

/// Operating system family the tool is running on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HostOs {
    MacOs,
    Windows,
    Linux,
    /// Anything else; laid out like Linux.
    Other,
}

impl HostOs {
    pub fn current() -> Self {
        Self::from_os_str(std::env::consts::OS)
    }

    pub fn from_os_str(os: &str) -> Self {
        match os {
            "macos" => HostOs::MacOs,
            "windows" => HostOs::Windows,
            "linux" => HostOs::Linux,
            _ => HostOs::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HostOs::MacOs => "macos",
            HostOs::Windows => "windows",
            HostOs::Linux => "linux",
            HostOs::Other => "other",
        }
    }
}

/// Environment directories the layout is derived from.
#[derive(Debug, Clone, Default)]
pub struct EnvDirs {
    pub home_dir: PathBuf,
    /// Roaming application data directory (`%APPDATA%`), Windows only.
    pub app_data: Option<PathBuf>,
}

/// Resolved locations for one platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformPaths {
    pub host_config: PathBuf,
    pub settings_dir: PathBuf,
    pub settings_file: PathBuf,
}

impl PlatformPaths {
    pub fn resolve(os: HostOs, env: &EnvDirs) -> Self {
        let home = env.home_dir.as_path();
        // An unset %APPDATA% resolves against an empty base, like a relative path.
        let app_data = env.app_data.clone().unwrap_or_default();

        let host_config = match os {
            HostOs::MacOs => home
                .join("Library")
                .join("Application Support")
                .join("Claude")
                .join(HOST_CONFIG_FILE),
            HostOs::Windows => app_data.join("Claude").join(HOST_CONFIG_FILE),
            HostOs::Linux | HostOs::Other => {
                home.join(".config").join("Claude").join(HOST_CONFIG_FILE)
            }
        };

        let settings_dir = match os {
            HostOs::Windows => app_data.join(SETTINGS_DIR_NAME),
            HostOs::MacOs | HostOs::Linux | HostOs::Other => {
                home.join(format!(".{SETTINGS_DIR_NAME}"))
            }
        };
        let settings_file = settings_dir.join(SETTINGS_FILE);

        Self {
            host_config,
            settings_dir,
            settings_file,
        }
    }
}

/// Prefix shared by every backup of `config_path`, e.g.
/// `claude_desktop_config.backup.`.
pub fn backup_prefix(config_path: &Path) -> String {
    let stem = config_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "config".to_string());
    format!("{stem}.backup.")
}

/// Timestamp suffix used in backup names: ISO-8601 with millisecond
/// precision, `:` and `.` replaced by `-` so names sort lexically.
pub fn backup_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string()
        .replace([':', '.'], "-")
}

/// Backup file path for `config_path` taken at `at`, placed next to it.
pub fn backup_path_for(config_path: &Path, at: DateTime<Utc>) -> PathBuf {
    let dir = config_path.parent().unwrap_or_else(|| Path::new(""));
    dir.join(format!(
        "{}{}.json",
        backup_prefix(config_path),
        backup_timestamp(at)
    ))
}
