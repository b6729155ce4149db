//! Restarting the host application after its config changed.
//!
//! Only macOS has a real controller; every other platform gets
//! [`UnsupportedController`] and the caller tells the user to restart by hand.

pub mod controller;
pub mod poll;
pub mod restarter;

pub use controller::{
    HOST_APP_BUNDLE, HOST_PROCESS_NAME, MacOsController, ProcessController, StopSignal,
    UnsupportedController, platform_controller,
};
pub use poll::{Clock, SystemClock, wait_until};
pub use restarter::{RestartOutcome, RestartTimings, Restarter};
