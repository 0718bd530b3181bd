//! Session lifecycle core for the VetDesk dashboards.
//!
//! This crate is UI-framework agnostic so dashboard crates can consume it
//! directly: the guard owns session validity and its retry/expiry rules, the
//! recovery coordinator preserves one interrupted user operation across an
//! expiry, and the expiry flow ties both to whatever presenter the embedding
//! dashboard provides. All I/O and timing go through the [`Gateway`] and
//! [`Clock`] seams, so every lifecycle property is testable natively with no
//! browser and no real timers.

pub mod clock;
pub mod config;
pub mod events;
pub mod gateway;
pub mod guard;
pub mod periodic;
pub mod presenter;
pub mod reauth;
pub mod recovery;
pub mod state;

#[cfg(test)]
pub(crate) mod testkit;

pub use clock::Clock;
pub use config::{CHECK_INTERVAL, GuardConfig, MAX_VALIDATION_ATTEMPTS, RETRY_DELAY};
pub use events::{SessionEvent, SessionEvents};
pub use gateway::{Gateway, GatewayError};
pub use guard::SessionGuard;
pub use periodic::{PeriodicHandle, UiGate};
pub use presenter::{Credentials, NotifyKind, Presenter, ReauthChoice};
pub use reauth::{FlowOutcome, run_expiry_flow, submit_operation};
pub use recovery::{OperationKind, PendingOperation, RecoveryCoordinator, ReplayOutcome};
pub use state::{SessionState, ValidationAttempt};
