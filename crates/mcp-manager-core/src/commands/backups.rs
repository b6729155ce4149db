//! Backup listing and manual cleanup.

use std::path::PathBuf;

use serde::Serialize;

use super::McpManager;
use crate::error::Result;

#[derive(Debug, Clone, Serialize)]
pub struct CleanReport {
    pub removed: usize,
    pub remaining: usize,
}

impl McpManager {
    /// Host config backups, newest first.
    pub fn list_backups(&self) -> Result<Vec<PathBuf>> {
        self.ctx.backup_store().list()
    }

    /// Keep only the newest `keep` backups.
    pub fn clean_backups(&self, keep: usize) -> Result<CleanReport> {
        let store = self.ctx.backup_store();
        let removed = store.prune(keep)?;
        let remaining = store.list()?.len();
        Ok(CleanReport { removed, remaining })
    }
}
