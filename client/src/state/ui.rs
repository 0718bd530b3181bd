//! Local UI chrome state: toasts and blocking dialogs.
//!
//! DESIGN
//! ======
//! Keeps transient presentation concerns out of domain state so the session
//! core stays rendering-free. The periodic validation gate reads
//! `blocking_ui_open` from here — validation never interrupts a user who
//! has a dialog open.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

use vetdesk::NotifyKind;

/// A transient notification shown in the toast stack.
#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    /// Monotonic id used as the render key and for dismissal.
    pub id: u64,
    pub kind: NotifyKind,
    pub message: String,
}

/// UI state for toasts and blocking dialogs.
#[derive(Clone, Debug, Default)]
pub struct UiState {
    /// Open dialogs that must suspend periodic validation. The reauth
    /// dialog is counted separately because it stays open across session
    /// checks.
    pub blocking_dialogs: u32,
    /// Whether the session-expired dialog is showing.
    pub reauth_dialog_open: bool,
    /// Live toasts, oldest first.
    pub toasts: Vec<Toast>,
    next_toast_id: u64,
}

impl UiState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any blocking UI is open (periodic validation gate).
    #[must_use]
    pub fn blocking_ui_open(&self) -> bool {
        self.blocking_dialogs > 0 || self.reauth_dialog_open
    }

    /// Record a modal/dialog opening.
    pub fn dialog_opened(&mut self) {
        self.blocking_dialogs += 1;
    }

    /// Record a modal/dialog closing.
    pub fn dialog_closed(&mut self) {
        self.blocking_dialogs = self.blocking_dialogs.saturating_sub(1);
    }

    /// Append a toast and return its id.
    pub fn push_toast(&mut self, kind: NotifyKind, message: impl Into<String>) -> u64 {
        let id = self.next_toast_id;
        self.next_toast_id += 1;
        self.toasts.push(Toast {
            id,
            kind,
            message: message.into(),
        });
        id
    }

    /// Remove a toast by id; unknown ids are ignored.
    pub fn dismiss_toast(&mut self, id: u64) {
        self.toasts.retain(|toast| toast.id != id);
    }
}
