//! Timestamped backups of the host config and their retention.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::Utc;

use crate::error::{ManagerError, Result};
use crate::paths::{backup_path_for, backup_prefix};

/// Number of backups kept after every new backup.
pub const DEFAULT_BACKUP_RETENTION: usize = 5;

/// Creates, lists and prunes backups that sit next to the host config.
#[derive(Debug, Clone)]
pub struct BackupStore {
    config_path: PathBuf,
    retention: Option<usize>,
}

impl BackupStore {
    /// Store that prunes down to [`DEFAULT_BACKUP_RETENTION`] after each backup.
    pub fn new(config_path: PathBuf) -> Self {
        Self {
            config_path,
            retention: Some(DEFAULT_BACKUP_RETENTION),
        }
    }

    /// Override the automatic retention; `None` disables pruning on create.
    pub fn with_retention(mut self, retention: Option<usize>) -> Self {
        self.retention = retention;
        self
    }

    pub fn retention(&self) -> Option<usize> {
        self.retention
    }

    fn backup_dir(&self) -> &Path {
        self.config_path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// Copy the host config to a fresh timestamped file and return its path.
    pub fn create(&self) -> Result<PathBuf> {
        if !self.config_path.exists() {
            return Err(ManagerError::NoConfigToBackup(self.config_path.clone()));
        }

        let mut at = Utc::now();
        let mut backup_path = backup_path_for(&self.config_path, at);
        // Two backups inside the same millisecond would collide.
        while backup_path.exists() {
            at += chrono::Duration::milliseconds(1);
            backup_path = backup_path_for(&self.config_path, at);
        }

        // Backups are ordered by mtime, so each copy needs a fresh one.
        std::fs::read(&self.config_path)
            .and_then(|bytes| std::fs::write(&backup_path, bytes))
            .map_err(|source| ManagerError::Backup {
                path: backup_path.clone(),
                source,
            })?;
        tracing::info!(backup = %backup_path.display(), "created host config backup");

        if let Some(keep) = self.retention {
            match self.prune(keep) {
                Ok(0) => {}
                Ok(removed) => tracing::debug!(removed, keep, "pruned old backups"),
                Err(err) => tracing::warn!(error = %err, "failed to prune old backups"),
            }
        }

        Ok(backup_path)
    }

    /// Backups of the host config, newest first.
    pub fn list(&self) -> Result<Vec<PathBuf>> {
        let dir = self.backup_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let prefix = backup_prefix(&self.config_path);
        let entries = std::fs::read_dir(dir).map_err(|e| ManagerError::ConfigRead {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut backups: Vec<(SystemTime, PathBuf)> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                let name = entry.file_name();
                let name = name.to_string_lossy();
                name.starts_with(&prefix) && name.ends_with(".json")
            })
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .map(|entry| {
                let modified = entry
                    .metadata()
                    .and_then(|m| m.modified())
                    .unwrap_or(SystemTime::UNIX_EPOCH);
                (modified, entry.path())
            })
            .collect();

        // Newest mtime first; equal mtimes fall back to the timestamped name.
        backups.sort_by(|(a_time, a_path), (b_time, b_path)| {
            b_time.cmp(a_time).then_with(|| b_path.cmp(a_path))
        });

        Ok(backups.into_iter().map(|(_, path)| path).collect())
    }

    /// Delete all but the newest `keep` backups and return how many were
    /// removed. A file that cannot be deleted is logged and skipped.
    pub fn prune(&self, keep: usize) -> Result<usize> {
        self.prune_with(keep, |path| std::fs::remove_file(path))
    }

    /// [`BackupStore::prune`] deleting each file through `remove`.
    pub fn prune_with<F>(&self, keep: usize, mut remove: F) -> Result<usize>
    where
        F: FnMut(&Path) -> std::io::Result<()>,
    {
        let backups = self.list()?;
        if backups.len() <= keep {
            return Ok(0);
        }

        let mut removed = 0;
        for path in &backups[keep..] {
            match remove(path) {
                Ok(()) => removed += 1,
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "failed to delete backup")
                }
            }
        }
        Ok(removed)
    }
}
