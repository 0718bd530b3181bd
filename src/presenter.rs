//! Presentation seam for notifications and the reauthentication prompt.
//!
//! SYSTEM CONTEXT
//! ==============
//! The core never renders. Dashboards implement this trait over their toast
//! queue and blocking dialog; the expiry flow drives it and interprets the
//! user's choice.

#[cfg(test)]
#[path = "presenter_test.rs"]
mod presenter_test;

/// Severity of a user-facing notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotifyKind {
    Info,
    Success,
    Warning,
    Error,
}

/// Login form values collected by the presenter's reauthentication dialog.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    // Keeps passwords out of logs and panic messages.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The user's answer to the session-expired prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReauthChoice {
    /// Re-run validation against the existing session cookie.
    Retry,
    /// Establish a fresh session with the supplied credentials.
    Login(Credentials),
    /// Give up; any pending operation is discarded.
    Dismiss,
}

/// Notification sink plus the blocking reauthentication prompt.
pub trait Presenter {
    /// Show a transient notification.
    fn notify(&self, kind: NotifyKind, message: &str);

    /// Block until the user answers the session-expired prompt.
    async fn prompt_reauthentication(&self) -> ReauthChoice;
}

impl<P: Presenter> Presenter for &P {
    fn notify(&self, kind: NotifyKind, message: &str) {
        (*self).notify(kind, message);
    }

    async fn prompt_reauthentication(&self) -> ReauthChoice {
        (*self).prompt_reauthentication().await
    }
}
