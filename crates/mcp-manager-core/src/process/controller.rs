//! Host application process control.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::paths::HostOs;

pub const HOST_PROCESS_NAME: &str = "Claude";
pub const HOST_APP_BUNDLE: &str = "/Applications/Claude.app";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopSignal {
    /// Ask the process to quit (SIGTERM).
    Graceful,
    /// Kill the process (SIGKILL).
    Forced,
}

/// Start/stop capability for the host application.
///
/// Stop and liveness checks are best-effort: a failing utility counts as
/// "not running" or "already stopped", never as an error.
pub trait ProcessController {
    /// Whether this platform can restart the host application at all.
    fn supports_restart(&self) -> bool;
    fn is_running(&self) -> bool;
    fn stop(&self, signal: StopSignal);
    fn launch(&self) -> std::io::Result<()>;
}

/// Pick the controller for `os`.
pub fn platform_controller(os: HostOs) -> Box<dyn ProcessController> {
    match os {
        HostOs::MacOs => Box::new(MacOsController::new()),
        HostOs::Windows | HostOs::Linux | HostOs::Other => Box::new(UnsupportedController),
    }
}

/// Drives the desktop app through `pgrep`, `pkill` and `open`.
#[derive(Debug, Clone)]
pub struct MacOsController {
    process_name: String,
    app_bundle: PathBuf,
}

impl Default for MacOsController {
    fn default() -> Self {
        Self::new()
    }
}

impl MacOsController {
    pub fn new() -> Self {
        Self {
            process_name: HOST_PROCESS_NAME.to_string(),
            app_bundle: PathBuf::from(HOST_APP_BUNDLE),
        }
    }

    pub fn app_bundle(&self) -> &Path {
        &self.app_bundle
    }

    /// Run a utility silently; `true` only on a zero exit status.
    fn run_quiet(program: &str, args: &[&str]) -> bool {
        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }
}

impl ProcessController for MacOsController {
    fn supports_restart(&self) -> bool {
        true
    }

    fn is_running(&self) -> bool {
        Self::run_quiet("pgrep", &["-x", self.process_name.as_str()])
    }

    fn stop(&self, signal: StopSignal) {
        let flag = match signal {
            StopSignal::Graceful => "-TERM",
            StopSignal::Forced => "-9",
        };
        if !Self::run_quiet("pkill", &[flag, self.process_name.as_str()]) {
            tracing::debug!(?signal, "pkill matched no process");
        }
    }

    fn launch(&self) -> std::io::Result<()> {
        let mut cmd = Command::new("open");
        if self.app_bundle.exists() {
            cmd.arg(&self.app_bundle);
        } else {
            cmd.args(["-a", self.process_name.as_str()]);
        }
        let output = cmd.output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(std::io::Error::other(format!(
                "open exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        Ok(())
    }
}

/// Used where automatic restart is not implemented.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedController;

impl ProcessController for UnsupportedController {
    fn supports_restart(&self) -> bool {
        false
    }

    fn is_running(&self) -> bool {
        false
    }

    fn stop(&self, _signal: StopSignal) {}

    fn launch(&self) -> std::io::Result<()> {
        Err(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "automatic restart is only supported on macOS",
        ))
    }
}
