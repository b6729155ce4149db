//! High-level manager operations.
//!
//! [`McpManager`] is the public API the CLI drives. Each operation is a
//! straight sequence of store reads/writes that returns a report; nothing
//! here prints.

pub mod backups;
pub mod project;
pub mod register;
pub mod servers;
pub mod settings;

pub use backups::CleanReport;
pub use project::InitReport;
pub use register::{AddOptions, AddReport, RemoveOptions, RemoveReport};
pub use servers::{ClearOptions, ClearReport, ServerSummary, StatusReport};
pub use settings::SettingsReport;

use crate::context::AppContext;
use crate::error::Result;
use crate::process::{
    Clock, ProcessController, RestartOutcome, RestartTimings, Restarter, SystemClock,
    platform_controller,
};

/// Orchestrates registry edits, backups and the optional restart.
pub struct McpManager {
    ctx: AppContext,
    controller: Box<dyn ProcessController>,
    clock: Box<dyn Clock>,
    timings: RestartTimings,
}

impl McpManager {
    /// Manager using the platform's process controller and the wall clock.
    pub fn new(ctx: AppContext) -> Self {
        let controller = platform_controller(ctx.os());
        Self {
            ctx,
            controller,
            clock: Box::new(SystemClock),
            timings: RestartTimings::default(),
        }
    }

    /// Manager for the current user and working directory.
    pub fn with_defaults() -> Result<Self> {
        Ok(Self::new(AppContext::from_env()?))
    }

    pub fn with_controller(mut self, controller: Box<dyn ProcessController>) -> Self {
        self.controller = controller;
        self
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_timings(mut self, timings: RestartTimings) -> Self {
        self.timings = timings;
        self
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    /// Restart the host application now.
    pub fn restart(&self) -> RestartOutcome {
        Restarter::new(self.controller.as_ref(), self.clock.as_ref())
            .with_timings(self.timings)
            .restart()
    }

    fn restart_if(&self, requested: bool) -> Option<RestartOutcome> {
        requested.then(|| self.restart())
    }
}

impl std::fmt::Debug for McpManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("McpManager")
            .field("ctx", &self.ctx)
            .field("timings", &self.timings)
            .finish_non_exhaustive()
    }
}
