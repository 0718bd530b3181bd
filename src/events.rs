//! Typed session lifecycle events.
//!
//! DESIGN
//! ======
//! The guard publishes transitions here instead of calling into rendering
//! code, so dashboards can wire toasts, dialogs, and redirects without the
//! guard knowing any of them exist. Single-threaded by construction: the
//! listener list is a `RefCell` and subscribers must not subscribe from
//! inside a callback.

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

use std::cell::RefCell;

use crate::state::SessionState;

/// A session lifecycle event published by the guard.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    /// The session state changed. Emitted for every transition.
    StateChanged {
        /// State before the transition.
        from: SessionState,
        /// State after the transition.
        to: SessionState,
    },
    /// A validation attempt failed but retries remain in the sequence.
    ValidationWarning {
        /// Attempts issued so far in the current sequence.
        attempts_made: u32,
        /// Failure text of the attempt that just failed.
        error: String,
    },
    /// The session transitioned into `Expired`. Emitted exactly once per
    /// transition, never repeated while the state stays `Expired`.
    Expired,
    /// The session returned to a live state after having been `Expired`.
    Reauthenticated,
}

/// Subscriber list for [`SessionEvent`]s.
#[derive(Default)]
pub struct SessionEvents {
    listeners: RefCell<Vec<Box<dyn Fn(&SessionEvent)>>>,
}

impl SessionEvents {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for every event.
    pub fn subscribe(&self, listener: impl Fn(&SessionEvent) + 'static) {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    /// Deliver an event to all listeners in subscription order.
    pub fn emit(&self, event: &SessionEvent) {
        for listener in self.listeners.borrow().iter() {
            listener(event);
        }
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl std::fmt::Debug for SessionEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionEvents")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
