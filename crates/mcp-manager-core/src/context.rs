//! Application context for dependency injection.

use std::path::{Path, PathBuf};

use crate::config::{BackupStore, HostConfigStore, SettingsStore};
use crate::error::{ManagerError, Result};
use crate::paths::{EnvDirs, HostOs, PlatformPaths};
use crate::runner::RunnerLocator;

/// Resolved locations and collaborators for one invocation.
///
/// Frontends create this once with [`AppContext::from_env`]; tests build it
/// from fixture directories with [`AppContext::from_paths`].
#[derive(Debug, Clone)]
pub struct AppContext {
    os: HostOs,
    home_dir: PathBuf,
    current_dir: PathBuf,
    host_config_path: PathBuf,
    settings_path: PathBuf,
    backup_retention: Option<usize>,
    runner: RunnerLocator,
}

impl AppContext {
    /// Derive everything from the running process: OS, home directory,
    /// `%APPDATA%` and the working directory.
    pub fn from_env() -> Result<Self> {
        let os = HostOs::current();
        let home_dir = dirs::home_dir().ok_or(ManagerError::HomeDirNotFound)?;
        let current_dir = std::env::current_dir().map_err(ManagerError::CurrentDir)?;
        let env = EnvDirs {
            home_dir: home_dir.clone(),
            app_data: std::env::var_os("APPDATA").map(PathBuf::from),
        };
        let paths = PlatformPaths::resolve(os, &env);
        tracing::debug!(
            os = os.as_str(),
            host_config = %paths.host_config.display(),
            settings = %paths.settings_file.display(),
            "resolved paths"
        );

        Ok(Self::from_paths(
            os,
            home_dir,
            current_dir,
            paths.host_config,
            paths.settings_file,
        ))
    }

    /// Context with explicit paths.
    pub fn from_paths(
        os: HostOs,
        home_dir: PathBuf,
        current_dir: PathBuf,
        host_config_path: PathBuf,
        settings_path: PathBuf,
    ) -> Self {
        Self {
            os,
            home_dir,
            current_dir,
            host_config_path,
            settings_path,
            backup_retention: Some(crate::config::DEFAULT_BACKUP_RETENTION),
            runner: RunnerLocator::default(),
        }
    }

    pub fn with_runner(mut self, runner: RunnerLocator) -> Self {
        self.runner = runner;
        self
    }

    pub fn with_backup_retention(mut self, retention: Option<usize>) -> Self {
        self.backup_retention = retention;
        self
    }

    pub fn os(&self) -> HostOs {
        self.os
    }

    pub fn home_dir(&self) -> &Path {
        &self.home_dir
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    pub fn host_config_path(&self) -> &Path {
        &self.host_config_path
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    pub fn runner(&self) -> &RunnerLocator {
        &self.runner
    }

    pub fn host_config_store(&self) -> HostConfigStore {
        HostConfigStore::new(self.host_config_path.clone())
    }

    pub fn backup_store(&self) -> BackupStore {
        BackupStore::new(self.host_config_path.clone()).with_retention(self.backup_retention)
    }

    pub fn settings_store(&self) -> SettingsStore {
        SettingsStore::new(self.settings_path.clone())
    }

    /// Normalize a user-supplied path against this context's home and
    /// working directory.
    pub fn normalize(&self, input: &str) -> PathBuf {
        crate::fs::normalize_path(input, &self.home_dir, &self.current_dir)
    }
}
