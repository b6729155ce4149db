#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::{Duration, Instant};

use mcp_manager_core::commands::McpManager;
use mcp_manager_core::context::AppContext;
use mcp_manager_core::paths::HostOs;
use mcp_manager_core::process::{Clock, ProcessController, StopSignal};
use serde_json::{Value, json};
use tempfile::TempDir;

/// Temp home with a projects dir, a host config path and a settings path.
pub struct Fixture {
    pub temp: TempDir,
    pub home: PathBuf,
    pub cwd: PathBuf,
    pub host_config: PathBuf,
    pub settings: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let home = temp.path().join("home");
        let cwd = home.join("projects");
        std::fs::create_dir_all(&cwd).expect("Failed to create projects dir");
        let host_config = home
            .join(".config")
            .join("Claude")
            .join("claude_desktop_config.json");
        let settings = home.join(".mcp-manager").join("config.json");

        Self {
            temp,
            home,
            cwd,
            host_config,
            settings,
        }
    }

    pub fn context(&self) -> AppContext {
        AppContext::from_paths(
            HostOs::Linux,
            self.home.clone(),
            self.cwd.clone(),
            self.host_config.clone(),
            self.settings.clone(),
        )
    }

    /// Context whose working directory is `cwd`.
    pub fn context_in(&self, cwd: &Path) -> AppContext {
        AppContext::from_paths(
            HostOs::Linux,
            self.home.clone(),
            cwd.to_path_buf(),
            self.host_config.clone(),
            self.settings.clone(),
        )
    }

    pub fn manager(&self) -> McpManager {
        McpManager::new(self.context())
    }

    /// Create `projects/<dir>` with a descriptor registering `name`.
    pub fn project(&self, dir: &str, name: &str) -> PathBuf {
        let descriptor = json!({
            "name": name,
            "config": {
                "command": "/usr/bin/node",
                "args": ["/srv/mcp.js"],
                "env": {"PROJECT_ID": name}
            }
        });
        self.project_with(dir, &descriptor)
    }

    pub fn project_with(&self, dir: &str, descriptor: &Value) -> PathBuf {
        let path = self.cwd.join(dir);
        std::fs::create_dir_all(&path).expect("Failed to create project dir");
        std::fs::write(
            path.join(".mcp-config.json"),
            serde_json::to_vec_pretty(descriptor).unwrap(),
        )
        .expect("Failed to write descriptor");
        path
    }

    pub fn write_host_config(&self, value: &Value) {
        std::fs::create_dir_all(self.host_config.parent().unwrap()).unwrap();
        std::fs::write(&self.host_config, serde_json::to_vec_pretty(value).unwrap()).unwrap();
    }

    pub fn host_config_json(&self) -> Value {
        let bytes = std::fs::read(&self.host_config).expect("host config missing");
        serde_json::from_slice(&bytes).unwrap()
    }

    pub fn backups(&self) -> Vec<PathBuf> {
        let dir = self.host_config.parent().unwrap();
        if !dir.exists() {
            return Vec::new();
        }
        let mut found: Vec<PathBuf> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().path())
            .filter(|p| {
                p.file_name()
                    .unwrap()
                    .to_string_lossy()
                    .starts_with("claude_desktop_config.backup.")
            })
            .collect();
        found.sort();
        found
    }
}

/// Clock that advances instantly on `sleep`.
pub struct FakeClock {
    now: Cell<Instant>,
    slept: Rc<Cell<Duration>>,
}

impl FakeClock {
    pub fn new() -> (Self, Rc<Cell<Duration>>) {
        let slept = Rc::new(Cell::new(Duration::ZERO));
        (
            Self {
                now: Cell::new(Instant::now()),
                slept: slept.clone(),
            },
            slept,
        )
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        self.now.get()
    }

    fn sleep(&self, duration: Duration) {
        self.now.set(self.now.get() + duration);
        self.slept.set(self.slept.get() + duration);
    }
}

/// Scripted host application that quits on a graceful stop.
#[derive(Clone)]
pub struct FakeHostApp {
    pub running: Rc<Cell<bool>>,
    pub calls: Rc<RefCell<Vec<String>>>,
}

impl FakeHostApp {
    pub fn new(running: bool) -> Self {
        Self {
            running: Rc::new(Cell::new(running)),
            calls: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl ProcessController for FakeHostApp {
    fn supports_restart(&self) -> bool {
        true
    }

    fn is_running(&self) -> bool {
        self.running.get()
    }

    fn stop(&self, signal: StopSignal) {
        self.calls.borrow_mut().push(format!("stop:{signal:?}"));
        self.running.set(false);
    }

    fn launch(&self) -> std::io::Result<()> {
        self.calls.borrow_mut().push("launch".to_string());
        self.running.set(true);
        Ok(())
    }
}
