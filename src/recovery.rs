//! Recovery coordinator: one saved user operation across an expiry.
//!
//! SYSTEM CONTEXT
//! ==============
//! When a submit is interrupted by session expiry, the dashboard parks the
//! operation here, the expiry flow reauthenticates, and the saved operation
//! is replayed exactly once. The slot never holds more than one operation;
//! a second save overwrites the first.

#[cfg(test)]
#[path = "recovery_test.rs"]
mod recovery_test;

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use wire::{Action, Envelope};

use crate::gateway::Gateway;

/// Kinds of user operation the dashboards can park for replay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// Service booking (grooming, boarding) from the client portal.
    Booking,
    /// Clinic appointment from either dashboard.
    Appointment,
}

impl OperationKind {
    /// Wire action issued when the operation is replayed.
    #[must_use]
    pub fn action(self) -> Action {
        match self {
            Self::Booking => Action::CreateBooking,
            Self::Appointment => Action::BookAppointment,
        }
    }

    /// Short label for notifications and logs.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Booking => "booking",
            Self::Appointment => "appointment",
        }
    }
}

/// A user operation saved for replay after reauthentication.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PendingOperation {
    /// What kind of operation was interrupted.
    pub kind: OperationKind,
    /// The original request parameters, replayed verbatim.
    pub payload: Map<String, Value>,
}

/// Result of a [`RecoveryCoordinator::resume`] call.
#[derive(Clone, Debug, PartialEq)]
pub enum ReplayOutcome {
    /// No operation was pending; nothing was issued.
    Idle,
    /// The replay was issued and the gateway accepted it.
    Completed {
        kind: OperationKind,
        envelope: Envelope,
    },
    /// The replay was issued and failed. The operation is not re-queued.
    Failed { kind: OperationKind, error: String },
}

/// Single-slot holder of the at-most-one pending operation.
#[derive(Clone, Default)]
pub struct RecoveryCoordinator {
    slot: Rc<RefCell<Option<PendingOperation>>>,
}

impl RecoveryCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Park an operation, overwriting any previous one (last write wins).
    pub fn save(&self, operation: PendingOperation) {
        let mut slot = self.slot.borrow_mut();
        if let Some(previous) = slot.as_ref() {
            log::warn!(
                "overwriting pending {} with new {}",
                previous.kind.label(),
                operation.kind.label()
            );
        }
        *slot = Some(operation);
    }

    /// Whether an operation is waiting for replay.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.slot.borrow().is_some()
    }

    /// Kind of the pending operation, if any.
    #[must_use]
    pub fn pending_kind(&self) -> Option<OperationKind> {
        self.slot.borrow().as_ref().map(|op| op.kind)
    }

    /// Drop the pending operation without replaying it.
    pub fn discard(&self) {
        self.slot.borrow_mut().take();
    }

    /// Replay the pending operation through the gateway exactly once.
    ///
    /// The slot is emptied before the request is issued, so a second call
    /// with no intervening `save` is a no-op and a failed replay is never
    /// retried automatically.
    pub async fn resume<G: Gateway>(&self, gateway: &G) -> ReplayOutcome {
        let Some(operation) = self.slot.borrow_mut().take() else {
            return ReplayOutcome::Idle;
        };

        let kind = operation.kind;
        match gateway.call(kind.action(), operation.payload).await {
            Ok(envelope) if envelope.success => ReplayOutcome::Completed { kind, envelope },
            Ok(envelope) => ReplayOutcome::Failed {
                kind,
                error: envelope
                    .message
                    .unwrap_or_else(|| "gateway reported failure".to_owned()),
            },
            Err(error) => ReplayOutcome::Failed {
                kind,
                error: error.to_string(),
            },
        }
    }
}

impl std::fmt::Debug for RecoveryCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecoveryCoordinator")
            .field("pending", &self.pending_kind())
            .finish()
    }
}
