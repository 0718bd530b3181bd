//! Session view-state derived from guard events.
//!
//! DESIGN
//! ======
//! A pure reducer over [`SessionEvent`]s so the banner/status rendering
//! never touches the guard directly. The controller subscribes it to the
//! guard's event bus and pushes each event through `apply_event`.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use vetdesk::{SessionEvent, SessionState};

/// What the dashboard shows about the session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionView {
    /// Last state reported by the guard.
    pub state: SessionState,
    /// Text of the most recent validation warning, cleared on recovery.
    pub last_warning: Option<String>,
}

impl SessionView {
    /// Fold one guard event into the view.
    pub fn apply_event(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::StateChanged { to, .. } => {
                self.state = *to;
                if *to == SessionState::Valid {
                    self.last_warning = None;
                }
            }
            SessionEvent::ValidationWarning { error, .. } => {
                self.last_warning = Some(error.clone());
            }
            SessionEvent::Expired | SessionEvent::Reauthenticated => {}
        }
    }

    /// Short status label for the session banner.
    #[must_use]
    pub fn status_label(&self) -> &'static str {
        match self.state {
            SessionState::Unvalidated => "Checking session…",
            SessionState::Valid => "Signed in",
            SessionState::Warning => "Connection trouble",
            SessionState::Expired => "Session expired",
        }
    }
}
