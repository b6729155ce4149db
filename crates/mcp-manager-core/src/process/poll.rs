//! Deadline-bounded polling with an injectable clock.

use std::time::{Duration, Instant};

/// Source of time for polling loops.
pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&self, duration: Duration);
}

/// Wall clock backed by `std::thread::sleep`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Check `condition` every `interval` until it holds or `timeout` elapses.
///
/// Returns `true` as soon as a check succeeds, `false` once the deadline has
/// passed without a successful check.
pub fn wait_until<F>(
    clock: &dyn Clock,
    timeout: Duration,
    interval: Duration,
    mut condition: F,
) -> bool
where
    F: FnMut() -> bool,
{
    let deadline = clock.now() + timeout;
    while clock.now() < deadline {
        if condition() {
            return true;
        }
        clock.sleep(interval);
    }
    false
}
