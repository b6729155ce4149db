mod support;

use std::path::{Path, PathBuf};

use serde_json::json;

use mcp_manager_core::commands::McpManager;
use mcp_manager_core::config::{ManagerSettings, ProjectDescriptor, SettingsStore};
use mcp_manager_core::error::ManagerError;
use mcp_manager_core::runner::RunnerLocator;
use support::Fixture;

/// Put an executable `node` in `<temp>/bin` and return that dir.
#[cfg(unix)]
fn fake_runner(fx: &Fixture) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let bin = fx.temp.path().join("bin");
    std::fs::create_dir_all(&bin).unwrap();
    let node = bin.join("node");
    std::fs::write(&node, "#!/bin/sh\n").unwrap();
    std::fs::set_permissions(&node, std::fs::Permissions::from_mode(0o755)).unwrap();
    bin
}

fn configure_server(fx: &Fixture) -> PathBuf {
    let server = fx.home.join("shared").join("server.js");
    std::fs::create_dir_all(server.parent().unwrap()).unwrap();
    std::fs::write(&server, "// shared server").unwrap();
    SettingsStore::new(fx.settings.clone())
        .save(&ManagerSettings {
            mcp_server_path: server.to_string_lossy().to_string(),
        })
        .unwrap();
    server
}

fn manager_in(fx: &Fixture, project: &Path, search_path: &Path) -> McpManager {
    let ctx = fx
        .context_in(project)
        .with_runner(RunnerLocator::default().with_search_path(search_path.as_os_str()));
    McpManager::new(ctx)
}

#[cfg(unix)]
#[test]
fn init_writes_descriptor() {
    let fx = Fixture::new();
    let bin = fake_runner(&fx);
    let server = configure_server(&fx);
    let project = fx.cwd.join("my-app");
    std::fs::create_dir_all(&project).unwrap();

    let report = manager_in(&fx, &project, &bin).init_project().unwrap();

    assert!(report.changed);
    assert_eq!(report.project_name, "my-app");
    assert_eq!(report.descriptor_path, project.join(".mcp-config.json"));

    let written: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&report.descriptor_path).unwrap()).unwrap();
    assert_eq!(
        written,
        json!({
            "name": "my-app",
            "config": {
                "command": bin.join("node").to_string_lossy(),
                "args": [server.to_string_lossy()],
                "env": {
                    "SERVER_ROOT": project.to_string_lossy(),
                    "MCP_MODE": "stdio",
                    "PROJECT_ID": "my-app"
                }
            }
        })
    );
    assert_eq!(
        ProjectDescriptor::load(&project).unwrap(),
        report.descriptor.unwrap()
    );
}

#[cfg(unix)]
#[test]
fn init_then_add_registers_project() {
    let fx = Fixture::new();
    let bin = fake_runner(&fx);
    configure_server(&fx);
    let project = fx.cwd.join("svc");
    std::fs::create_dir_all(&project).unwrap();
    let manager = manager_in(&fx, &project, &bin);

    manager.init_project().unwrap();
    let added = manager.add(".", &Default::default()).unwrap();

    assert!(added.changed);
    assert_eq!(added.name, "svc");
    let servers = manager.list().unwrap();
    assert_eq!(servers.len(), 1);
    assert_eq!(servers[0].env_count, Some(3));
}

#[test]
fn init_keeps_existing_descriptor() {
    let fx = Fixture::new();
    let project = fx.project("keep", "custom-name");
    let before = std::fs::read(project.join(".mcp-config.json")).unwrap();
    let empty_bin = fx.temp.path().join("empty-bin");
    std::fs::create_dir_all(&empty_bin).unwrap();

    let report = manager_in(&fx, &project, &empty_bin)
        .init_project()
        .unwrap();

    assert!(!report.changed);
    assert_eq!(report.descriptor, None);
    assert_eq!(
        std::fs::read(project.join(".mcp-config.json")).unwrap(),
        before
    );
}

#[test]
fn init_without_runner_fails() {
    let fx = Fixture::new();
    configure_server(&fx);
    let project = fx.cwd.join("app");
    std::fs::create_dir_all(&project).unwrap();
    let empty_bin = fx.temp.path().join("empty-bin");
    std::fs::create_dir_all(&empty_bin).unwrap();

    let err = manager_in(&fx, &project, &empty_bin)
        .init_project()
        .unwrap_err();

    assert!(matches!(err, ManagerError::RunnerNotFound(ref program) if program == "node"));
    assert!(!project.join(".mcp-config.json").exists());
}

#[cfg(unix)]
#[test]
fn init_requires_configured_server_path() {
    let fx = Fixture::new();
    let bin = fake_runner(&fx);
    let project = fx.cwd.join("app");
    std::fs::create_dir_all(&project).unwrap();

    let err = manager_in(&fx, &project, &bin).init_project().unwrap_err();

    assert!(matches!(err, ManagerError::NotConfigured));
    assert!(!project.join(".mcp-config.json").exists());
}

#[cfg(unix)]
#[test]
fn init_rejects_vanished_server_path() {
    let fx = Fixture::new();
    let bin = fake_runner(&fx);
    let server = configure_server(&fx);
    std::fs::remove_file(&server).unwrap();
    let project = fx.cwd.join("app");
    std::fs::create_dir_all(&project).unwrap();

    let err = manager_in(&fx, &project, &bin).init_project().unwrap_err();

    assert!(matches!(err, ManagerError::PathNotFound(path) if path == server));
}
