//! Session guard: validation, retry, expiry, reauthentication.
//!
//! SYSTEM CONTEXT
//! ==============
//! One guard instance per dashboard owns the session lifecycle. It is the
//! only writer of [`SessionState`]; everything user-visible hangs off the
//! events it publishes. Handles are cheap clones over shared state so page
//! controllers, the periodic loop, and the expiry flow can hold the same
//! guard.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures, non-success envelopes, and malformed responses all
//! count identically toward the retry bound. The retry bound exhausting is
//! the one and only path into `Expired`.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde_json::Map;
use wire::Action;

use crate::clock::Clock;
use crate::config::GuardConfig;
use crate::events::{SessionEvent, SessionEvents};
use crate::gateway::Gateway;
use crate::state::{SessionState, ValidationAttempt};

/// Owner of session validity for one dashboard instance.
pub struct SessionGuard<G, C> {
    inner: Rc<Inner<G, C>>,
}

struct Inner<G, C> {
    gateway: G,
    clock: C,
    config: GuardConfig,
    state: Cell<SessionState>,
    // Monotonic sequence number; a validation sequence whose epoch is stale
    // after an await writes nothing.
    epoch: Cell<u64>,
    attempt: RefCell<Option<ValidationAttempt>>,
    events: SessionEvents,
}

impl<G, C> Clone for SessionGuard<G, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<G: Gateway, C: Clock> SessionGuard<G, C> {
    /// Guard with the default retry/interval configuration.
    #[must_use]
    pub fn new(gateway: G, clock: C) -> Self {
        Self::with_config(gateway, clock, GuardConfig::default())
    }

    /// Guard with explicit configuration (tests, staff desk tuning).
    #[must_use]
    pub fn with_config(gateway: G, clock: C, config: GuardConfig) -> Self {
        Self {
            inner: Rc::new(Inner {
                gateway,
                clock,
                config,
                state: Cell::new(SessionState::Unvalidated),
                epoch: Cell::new(0),
                attempt: RefCell::new(None),
                events: SessionEvents::new(),
            }),
        }
    }

    /// Current session state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.inner.state.get()
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> GuardConfig {
        self.inner.config
    }

    /// Event bus for lifecycle subscriptions.
    #[must_use]
    pub fn events(&self) -> &SessionEvents {
        &self.inner.events
    }

    /// Snapshot of the validation sequence currently in flight, if any.
    #[must_use]
    pub fn attempt_in_flight(&self) -> Option<ValidationAttempt> {
        self.inner.attempt.borrow().clone()
    }

    /// Register a handler invoked exactly once per transition into
    /// `Expired`.
    pub fn on_expiry(&self, handler: impl Fn() + 'static) {
        self.inner.events.subscribe(move |event| {
            if matches!(event, SessionEvent::Expired) {
                handler();
            }
        });
    }

    pub(crate) fn gateway(&self) -> &G {
        &self.inner.gateway
    }

    pub(crate) fn clock(&self) -> &C {
        &self.inner.clock
    }

    /// Run one validation sequence: up to `max_attempts` session checks with
    /// the fixed delay between them.
    ///
    /// Terminal success transitions to `Valid` (or `Warning` when the server
    /// flags the session as expiring). Exhaustion transitions to `Expired`.
    /// If a newer sequence or a logout starts while this one is suspended,
    /// the late result is discarded and the state is returned unchanged.
    pub async fn validate(&self) -> SessionState {
        let epoch = self.begin_sequence();
        let max = self.inner.config.max_attempts;

        for attempt_no in 1..=max {
            let outcome = self.check_session_once().await;
            if self.sequence_is_stale(epoch) {
                return self.state();
            }

            let error = match outcome {
                Ok(expiring) => {
                    self.inner.attempt.borrow_mut().take();
                    self.transition(if expiring {
                        SessionState::Warning
                    } else {
                        SessionState::Valid
                    });
                    return self.state();
                }
                Err(error) => error,
            };

            if let Some(record) = self.inner.attempt.borrow_mut().as_mut() {
                record.record_failure(error.clone());
            }
            log::warn!("session check attempt {attempt_no}/{max} failed: {error}");

            if attempt_no < max {
                self.inner.events.emit(&SessionEvent::ValidationWarning {
                    attempts_made: attempt_no,
                    error,
                });
                if self.state() == SessionState::Valid {
                    self.transition(SessionState::Warning);
                }
                self.inner.clock.sleep(self.inner.config.retry_delay).await;
                if self.sequence_is_stale(epoch) {
                    return self.state();
                }
            }
        }

        self.inner.attempt.borrow_mut().take();
        self.transition(SessionState::Expired);
        self.state()
    }

    /// Single user-initiated revalidation ("try again" / post-login).
    ///
    /// Returns whether the session came back live.
    pub async fn reauthenticate(&self) -> bool {
        self.validate().await.is_live()
    }

    /// Best-effort server-side logout, then reset to `Unvalidated`.
    ///
    /// Any in-flight validation sequence is invalidated first so its late
    /// result cannot resurrect the session.
    pub async fn logout(&self) {
        self.bump_epoch();
        match self.inner.gateway.call(Action::Logout, Map::new()).await {
            Ok(envelope) if envelope.success => {}
            Ok(envelope) => {
                log::warn!(
                    "logout rejected by gateway: {}",
                    envelope.message.as_deref().unwrap_or("no message")
                );
            }
            Err(error) => log::warn!("logout call failed: {error}"),
        }
        self.inner.attempt.borrow_mut().take();
        self.transition(SessionState::Unvalidated);
    }

    /// One `check_session` round trip, classified.
    ///
    /// `Ok(expiring)` on a success envelope; `Err(text)` for transport
    /// failures and non-success envelopes alike.
    async fn check_session_once(&self) -> Result<bool, String> {
        match self.inner.gateway.call(Action::CheckSession, Map::new()).await {
            Ok(envelope) if envelope.success => Ok(envelope.data_flag("expiring")),
            Ok(envelope) => Err(envelope
                .message
                .unwrap_or_else(|| "gateway reported failure".to_owned())),
            Err(error) => Err(error.to_string()),
        }
    }

    fn begin_sequence(&self) -> u64 {
        let epoch = self.bump_epoch();
        *self.inner.attempt.borrow_mut() =
            Some(ValidationAttempt::starting_at(self.inner.clock.now_ms()));
        epoch
    }

    fn bump_epoch(&self) -> u64 {
        let epoch = self.inner.epoch.get().wrapping_add(1);
        self.inner.epoch.set(epoch);
        epoch
    }

    fn sequence_is_stale(&self, epoch: u64) -> bool {
        if self.inner.epoch.get() == epoch {
            return false;
        }
        log::debug!("discarding stale session check result");
        true
    }

    fn transition(&self, to: SessionState) {
        let from = self.inner.state.get();
        if from == to {
            return;
        }
        self.inner.state.set(to);
        self.inner.events.emit(&SessionEvent::StateChanged { from, to });
        if to == SessionState::Expired {
            self.inner.events.emit(&SessionEvent::Expired);
        }
        if from == SessionState::Expired && to.is_live() {
            self.inner.events.emit(&SessionEvent::Reauthenticated);
        }
    }
}
