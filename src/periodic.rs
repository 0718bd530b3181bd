//! Periodic re-validation loop.
//!
//! SYSTEM CONTEXT
//! ==============
//! Dashboards spawn [`run`] as a local task after login. Each tick sleeps
//! the configured interval, then re-validates — unless a blocking modal is
//! open (never interrupt user input) or the session is no longer live (the
//! expiry flow owns it from there).

#[cfg(test)]
#[path = "periodic_test.rs"]
mod periodic_test;

use std::cell::Cell;
use std::rc::Rc;

use crate::clock::Clock;
use crate::gateway::Gateway;
use crate::guard::SessionGuard;

/// Probe for blocking UI that must suspend periodic validation.
pub trait UiGate {
    /// Whether a blocking modal/dialog is currently open.
    fn blocking_ui_open(&self) -> bool;
}

impl<F: Fn() -> bool> UiGate for F {
    fn blocking_ui_open(&self) -> bool {
        self()
    }
}

/// Cancellation handle for a running periodic loop.
///
/// Clones share liveness, so a controller can keep one and hand another to
/// the spawned task.
#[derive(Clone, Debug, Default)]
pub struct PeriodicHandle {
    stopped: Rc<Cell<bool>>,
}

impl PeriodicHandle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop the loop at its next tick boundary (logout, page teardown).
    pub fn stop(&self) {
        self.stopped.set(true);
    }

    /// Whether the loop should keep ticking.
    #[must_use]
    pub fn is_live(&self) -> bool {
        !self.stopped.get()
    }
}

/// Drive periodic validation until the handle is stopped.
///
/// Ordering per tick: sleep the interval, honor the stop handle, skip if a
/// blocking modal is open, skip unless the session is live, validate.
/// Skipped ticks do not reschedule early; the next check happens one full
/// interval later.
pub async fn run<G, C, U>(guard: SessionGuard<G, C>, gate: U, handle: PeriodicHandle)
where
    G: Gateway,
    C: Clock,
    U: UiGate,
{
    let interval = guard.config().check_interval;
    loop {
        guard.clock().sleep(interval).await;
        if !handle.is_live() {
            return;
        }
        if gate.blocking_ui_open() {
            log::debug!("periodic validation skipped: blocking modal open");
            continue;
        }
        if !guard.state().is_live() {
            continue;
        }
        guard.validate().await;
    }
}
