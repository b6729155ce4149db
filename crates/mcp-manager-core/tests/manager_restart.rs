mod support;

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use serde_json::json;

use mcp_manager_core::commands::{AddOptions, ClearOptions, McpManager, RemoveOptions};
use mcp_manager_core::paths::HostOs;
use mcp_manager_core::process::{RestartOutcome, RestartTimings};
use support::{FakeClock, FakeHostApp, Fixture};

fn manager_with(fx: &Fixture, app: &FakeHostApp) -> (McpManager, Rc<Cell<Duration>>) {
    let (clock, slept) = FakeClock::new();
    let manager = fx
        .manager()
        .with_controller(Box::new(app.clone()))
        .with_clock(Box::new(clock));
    (manager, slept)
}

#[test]
fn add_with_restart_cycles_running_app() {
    let fx = Fixture::new();
    fx.project("alpha", "alpha");
    let app = FakeHostApp::new(true);
    let (manager, slept) = manager_with(&fx, &app);

    let report = manager
        .add("alpha", &AddOptions::new().with_restart(true))
        .unwrap();

    assert_eq!(
        report.restart,
        Some(RestartOutcome::Restarted {
            was_running: true,
            forced: false,
        })
    );
    assert_eq!(*app.calls.borrow(), vec!["stop:Graceful", "launch"]);
    assert!(app.running.get());
    assert_eq!(slept.get(), Duration::from_secs(1));
}

#[test]
fn add_with_restart_launches_stopped_app() {
    let fx = Fixture::new();
    fx.project("alpha", "alpha");
    let app = FakeHostApp::new(false);
    let (manager, slept) = manager_with(&fx, &app);

    let report = manager
        .add("alpha", &AddOptions::new().with_restart(true))
        .unwrap();

    assert_eq!(
        report.restart,
        Some(RestartOutcome::Restarted {
            was_running: false,
            forced: false,
        })
    );
    assert_eq!(*app.calls.borrow(), vec!["launch"]);
    assert_eq!(slept.get(), Duration::ZERO);
}

#[test]
fn mutation_without_restart_leaves_app_alone() {
    let fx = Fixture::new();
    fx.project("alpha", "alpha");
    let app = FakeHostApp::new(true);
    let (manager, _) = manager_with(&fx, &app);

    manager.add("alpha", &AddOptions::new()).unwrap();
    manager.remove("alpha", &RemoveOptions::new()).unwrap();

    assert!(app.calls.borrow().is_empty());
}

#[test]
fn noop_mutations_skip_requested_restart() {
    let fx = Fixture::new();
    fx.write_host_config(&json!({"mcpServers": {}}));
    fx.project("alpha", "alpha");
    let app = FakeHostApp::new(true);
    let (manager, _) = manager_with(&fx, &app);

    let removed = manager
        .remove("alpha", &RemoveOptions::new().with_restart(true))
        .unwrap();
    let cleared = manager
        .clear(&ClearOptions::new().with_restart(true))
        .unwrap();

    assert_eq!(removed.restart, None);
    assert_eq!(cleared.restart, None);
    assert!(app.calls.borrow().is_empty());
}

#[test]
fn clear_with_restart() {
    let fx = Fixture::new();
    fx.write_host_config(&json!({"mcpServers": {"a": {"command": "node", "args": []}}}));
    let app = FakeHostApp::new(true);
    let (manager, _) = manager_with(&fx, &app);

    let report = manager
        .clear(&ClearOptions::new().with_restart(true))
        .unwrap();

    assert_eq!(report.removed, 1);
    assert!(report.restart.is_some_and(|outcome| outcome.is_restarted()));
}

#[test]
fn custom_timings_control_settle_pause() {
    let fx = Fixture::new();
    let app = FakeHostApp::new(true);
    let (manager, slept) = manager_with(&fx, &app);
    let manager = manager.with_timings(RestartTimings {
        settle: Duration::from_millis(250),
        ..RestartTimings::default()
    });

    assert!(manager.restart().is_restarted());
    assert_eq!(slept.get(), Duration::from_millis(250));
}

#[test]
fn restart_unsupported_off_macos() {
    let fx = Fixture::new();
    assert_eq!(fx.context().os(), HostOs::Linux);

    assert_eq!(fx.manager().restart(), RestartOutcome::Unsupported);
}

#[test]
fn restart_outcome_serializes_with_status_tag() {
    let outcome = RestartOutcome::Restarted {
        was_running: true,
        forced: true,
    };

    assert_eq!(
        serde_json::to_value(&outcome).unwrap(),
        json!({"status": "restarted", "was_running": true, "forced": true})
    );
    assert_eq!(
        serde_json::to_value(RestartOutcome::Unsupported).unwrap(),
        json!({"status": "unsupported"})
    );
}
