//! Session lifecycle state for one dashboard instance.
//!
//! SYSTEM CONTEXT
//! ==============
//! This model is the single source of truth for session validity. Only the
//! guard transitions it; dashboards read it to gate navigation and the
//! periodic re-check loop. Nothing here survives a page reload.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use serde::{Deserialize, Serialize};

/// Validity of the current session as last determined by the guard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// No validation has completed yet (initial page state).
    #[default]
    Unvalidated,
    /// The most recent validation sequence succeeded.
    Valid,
    /// The session is still usable but expiry is imminent: a validation
    /// sequence has seen a transient failure, or the server flagged the
    /// session as expiring.
    Warning,
    /// The most recent validation sequence exhausted its retries without
    /// success.
    Expired,
}

impl SessionState {
    /// Whether the session is currently usable for issuing operations.
    #[must_use]
    pub fn is_live(self) -> bool {
        matches!(self, Self::Valid | Self::Warning)
    }
}

/// Ephemeral record of one in-progress validation sequence.
///
/// Created when a sequence starts and discarded once it resolves, so a
/// populated record always describes the sequence currently in flight.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidationAttempt {
    /// Number of attempts issued so far in this sequence.
    pub attempts_made: u32,
    /// Clock reading (ms) when the sequence started.
    pub started_at_ms: f64,
    /// Text of the most recent failure, if any attempt has failed.
    pub last_error: Option<String>,
}

impl ValidationAttempt {
    /// Fresh record for a sequence starting now.
    #[must_use]
    pub fn starting_at(now_ms: f64) -> Self {
        Self {
            attempts_made: 0,
            started_at_ms: now_ms,
            last_error: None,
        }
    }

    /// Record one failed attempt.
    pub fn record_failure(&mut self, error: impl Into<String>) {
        self.attempts_made += 1;
        self.last_error = Some(error.into());
    }
}
