//! Per-dashboard session wiring over the core.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each dashboard (client portal, staff desk) owns one [`DashboardSession`]:
//! an independent guard instance, recovery slot, and presenter, plus the
//! spawned background work. Handles are cheap clones, so event handlers and
//! spawned tasks share the same session.

use std::cell::Cell;
use std::rc::Rc;

use leptos::prelude::*;
use serde_json::{Map, Value};

use vetdesk::{
    OperationKind, PeriodicHandle, RecoveryCoordinator, SessionGuard,
};

use crate::net::api::HttpGateway;
use crate::state::auth::AuthState;
use crate::state::session::SessionView;
use crate::state::ui::UiState;
use crate::util::clock::BrowserClock;
use crate::util::presenter::DialogPresenter;

/// Guard type as instantiated by the dashboards.
pub type AppGuard = SessionGuard<HttpGateway, BrowserClock>;

/// One dashboard's session lifecycle bundle.
#[derive(Clone)]
pub struct DashboardSession {
    pub guard: AppGuard,
    pub recovery: RecoveryCoordinator,
    pub presenter: DialogPresenter,
    periodic: PeriodicHandle,
    // True while a submit-driven expiry flow owns the prompt, so the
    // spontaneous-expiry hook does not open a second one.
    flow_active: Rc<Cell<bool>>,
    auth: RwSignal<AuthState>,
    ui: RwSignal<UiState>,
}

impl DashboardSession {
    /// Build the session bundle and subscribe the view mirror.
    #[must_use]
    pub fn new(
        auth: RwSignal<AuthState>,
        ui: RwSignal<UiState>,
        session_view: RwSignal<SessionView>,
    ) -> Self {
        let guard = SessionGuard::new(HttpGateway::new(), BrowserClock);
        guard
            .events()
            .subscribe(move |event| session_view.update(|view| view.apply_event(event)));

        let session = Self {
            guard,
            recovery: RecoveryCoordinator::new(),
            presenter: DialogPresenter::new(ui),
            periodic: PeriodicHandle::new(),
            flow_active: Rc::new(Cell::new(false)),
            auth,
            ui,
        };
        session.install_expiry_hook();
        session
    }

    /// Launch a recovery flow whenever the session expires outside a
    /// submit (periodic check, manual revalidation).
    fn install_expiry_hook(&self) {
        #[cfg(feature = "hydrate")]
        {
            let session = self.clone();
            self.guard.on_expiry(move || {
                if session.flow_active.get() {
                    return;
                }
                let session = session.clone();
                leptos::task::spawn_local(async move {
                    session.flow_active.set(true);
                    vetdesk::run_expiry_flow(&session.guard, &session.recovery, &session.presenter)
                        .await;
                    session.flow_active.set(false);
                });
            });
        }
    }

    /// Initial validation and profile fetch, then the periodic loop. Runs
    /// until [`Self::stop`] or sign-out.
    pub fn start(&self) {
        #[cfg(feature = "hydrate")]
        {
            let session = self.clone();
            leptos::task::spawn_local(async move {
                session.auth.set(AuthState::loading());
                let state = session.guard.validate().await;
                let user = if state.is_live() {
                    crate::net::api::fetch_user_info(&HttpGateway::new()).await
                } else {
                    None
                };
                session.auth.update(|auth| auth.resolve(user));

                let ui = session.ui;
                vetdesk::periodic::run(
                    session.guard.clone(),
                    move || ui.get_untracked().blocking_ui_open(),
                    session.periodic.clone(),
                )
                .await;
            });
        }
    }

    /// Submit a replayable operation with expiry interception.
    pub fn submit(&self, kind: OperationKind, payload: Map<String, Value>) {
        #[cfg(feature = "hydrate")]
        {
            let session = self.clone();
            leptos::task::spawn_local(async move {
                session.flow_active.set(true);
                vetdesk::submit_operation(
                    &session.guard,
                    &session.recovery,
                    &session.presenter,
                    vetdesk::PendingOperation { kind, payload },
                )
                .await;
                session.flow_active.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (kind, payload);
        }
    }

    /// Server-side logout, then back to the login page.
    pub fn sign_out(&self) {
        #[cfg(feature = "hydrate")]
        {
            let session = self.clone();
            leptos::task::spawn_local(async move {
                session.periodic.stop();
                session.guard.logout().await;
                session.auth.update(|auth| auth.resolve(None));
                if let Some(window) = web_sys::window() {
                    let _ = window.location().set_href("/login");
                }
            });
        }
    }

    /// Stop background work (page teardown).
    pub fn stop(&self) {
        self.periodic.stop();
    }
}
