//! Locating the local script runner that launches the shared MCP server.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{ManagerError, Result};

pub const DEFAULT_RUNNER: &str = "node";

/// Resolves a runner program name to an absolute executable path.
#[derive(Debug, Clone)]
pub struct RunnerLocator {
    program: String,
    search_path: Option<OsString>,
}

impl Default for RunnerLocator {
    fn default() -> Self {
        Self::new(DEFAULT_RUNNER)
    }
}

impl RunnerLocator {
    /// Search the process `PATH` for `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            search_path: None,
        }
    }

    /// Search only the given `PATH`-style list of directories.
    pub fn with_search_path(mut self, search_path: impl Into<OsString>) -> Self {
        self.search_path = Some(search_path.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn locate(&self, cwd: &Path) -> Result<PathBuf> {
        let found = match &self.search_path {
            Some(paths) => which::which_in(&self.program, Some(paths), cwd),
            None => which::which(&self.program),
        };
        let path = found.map_err(|_| ManagerError::RunnerNotFound(self.program.clone()))?;
        tracing::debug!(runner = %path.display(), "resolved script runner");
        Ok(path)
    }
}
