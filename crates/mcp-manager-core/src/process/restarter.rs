//! Stop-then-relaunch sequence for the host application.

use std::time::Duration;

use serde::Serialize;

use super::controller::{ProcessController, StopSignal};
use super::poll::{Clock, wait_until};

/// Timing knobs for a restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestartTimings {
    pub poll_interval: Duration,
    pub graceful_timeout: Duration,
    pub forced_timeout: Duration,
    /// Pause between the process going away and the relaunch.
    pub settle: Duration,
}

impl Default for RestartTimings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(500),
            graceful_timeout: Duration::from_secs(10),
            forced_timeout: Duration::from_secs(5),
            settle: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RestartOutcome {
    /// This platform has no automatic restart; the user must restart by hand.
    Unsupported,
    Restarted { was_running: bool, forced: bool },
    /// The process was stopped (if running) but could not be started again.
    LaunchFailed { reason: String },
}

impl RestartOutcome {
    pub fn is_restarted(&self) -> bool {
        matches!(self, RestartOutcome::Restarted { .. })
    }
}

pub struct Restarter<'a> {
    controller: &'a dyn ProcessController,
    clock: &'a dyn Clock,
    timings: RestartTimings,
}

impl<'a> Restarter<'a> {
    pub fn new(controller: &'a dyn ProcessController, clock: &'a dyn Clock) -> Self {
        Self {
            controller,
            clock,
            timings: RestartTimings::default(),
        }
    }

    pub fn with_timings(mut self, timings: RestartTimings) -> Self {
        self.timings = timings;
        self
    }

    /// Stop the host application if it is running, escalating to a forced
    /// stop when it outlives the graceful timeout, then launch it again.
    ///
    /// Never fails: every problem is reported through the outcome.
    pub fn restart(&self) -> RestartOutcome {
        if !self.controller.supports_restart() {
            tracing::info!("automatic restart not supported on this platform");
            return RestartOutcome::Unsupported;
        }

        let was_running = self.controller.is_running();
        let mut forced = false;

        if was_running {
            tracing::info!("stopping host application");
            self.controller.stop(StopSignal::Graceful);

            if !self.wait_for_exit(self.timings.graceful_timeout) {
                tracing::warn!(
                    timeout = ?self.timings.graceful_timeout,
                    "host application did not exit, forcing stop"
                );
                forced = true;
                self.controller.stop(StopSignal::Forced);
                if !self.wait_for_exit(self.timings.forced_timeout) {
                    tracing::warn!("host application still running after forced stop");
                }
            }

            self.clock.sleep(self.timings.settle);
        }

        tracing::info!("launching host application");
        match self.controller.launch() {
            Ok(()) => RestartOutcome::Restarted {
                was_running,
                forced,
            },
            Err(err) => {
                tracing::warn!(error = %err, "failed to launch host application");
                RestartOutcome::LaunchFailed {
                    reason: err.to_string(),
                }
            }
        }
    }

    fn wait_for_exit(&self, timeout: Duration) -> bool {
        wait_until(self.clock, timeout, self.timings.poll_interval, || {
            !self.controller.is_running()
        })
    }
}
