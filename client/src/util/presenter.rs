//! Signal-backed implementation of the core's presenter seam.
//!
//! SYSTEM CONTEXT
//! ==============
//! Notifications land in the toast stack; the reauthentication prompt opens
//! the blocking dialog and suspends until one of its buttons resolves the
//! choice. The expiry flow in the core awaits that suspension, so the user
//! decides retry/sign-in/dismiss at their own pace.

use leptos::prelude::*;

use vetdesk::{NotifyKind, Presenter, ReauthChoice};

use crate::state::ui::UiState;

/// [`Presenter`] bridging the core to the dashboard's UI state.
#[derive(Clone)]
pub struct DialogPresenter {
    ui: RwSignal<UiState>,
    #[cfg(feature = "hydrate")]
    pending: std::rc::Rc<
        std::cell::RefCell<Option<futures::channel::oneshot::Sender<ReauthChoice>>>,
    >,
}

impl DialogPresenter {
    #[must_use]
    pub fn new(ui: RwSignal<UiState>) -> Self {
        Self {
            ui,
            #[cfg(feature = "hydrate")]
            pending: std::rc::Rc::default(),
        }
    }

    /// Resolve the open prompt with the user's choice (dialog buttons).
    ///
    /// A resolve with no prompt outstanding is ignored, so a double-click
    /// cannot answer a prompt twice.
    pub fn resolve_prompt(&self, choice: ReauthChoice) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(sender) = self.pending.borrow_mut().take() {
                let _ = sender.send(choice);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = choice;
        }
    }
}

impl Presenter for DialogPresenter {
    fn notify(&self, kind: NotifyKind, message: &str) {
        let message = message.to_owned();
        self.ui.update(|ui| {
            ui.push_toast(kind, message);
        });
    }

    async fn prompt_reauthentication(&self) -> ReauthChoice {
        #[cfg(feature = "hydrate")]
        {
            let (sender, receiver) = futures::channel::oneshot::channel();
            *self.pending.borrow_mut() = Some(sender);
            self.ui.update(|ui| ui.reauth_dialog_open = true);
            // A dropped sender (dialog torn down) counts as a dismissal.
            let choice = receiver.await.unwrap_or(ReauthChoice::Dismiss);
            self.ui.update(|ui| ui.reauth_dialog_open = false);
            choice
        }
        #[cfg(not(feature = "hydrate"))]
        {
            ReauthChoice::Dismiss
        }
    }
}
