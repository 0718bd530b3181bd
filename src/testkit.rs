//! Shared fakes for core tests: scripted gateway, immediate clock,
//! scripted presenter. All handles are cheap clones over shared state so a
//! test can keep one half and move the other into the guard.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};
use std::time::Duration;

use serde_json::{Map, Value};
use wire::{Action, Envelope};

use crate::clock::Clock;
use crate::gateway::{Gateway, GatewayError};
use crate::presenter::{NotifyKind, Presenter, ReauthChoice};

/// Success envelope for a live session.
pub fn ok_session() -> Result<Envelope, GatewayError> {
    Ok(Envelope::ok(serde_json::json!({ "valid": true })))
}

/// Success envelope flagged as expiring soon.
pub fn expiring_session() -> Result<Envelope, GatewayError> {
    Ok(Envelope::ok(serde_json::json!({ "valid": true, "expiring": true })))
}

/// Well-formed envelope with `success: false`.
pub fn rejected(message: &str) -> Result<Envelope, GatewayError> {
    Ok(Envelope::failure(message))
}

/// Simulated network failure.
pub fn transport_down() -> Result<Envelope, GatewayError> {
    Err(GatewayError::Transport("connection refused".to_owned()))
}

/// Gateway that answers from a fixed script and records every call.
#[derive(Clone, Default)]
pub struct FakeGateway {
    inner: Rc<FakeGatewayInner>,
}

#[derive(Default)]
struct FakeGatewayInner {
    script: RefCell<VecDeque<Result<Envelope, GatewayError>>>,
    calls: RefCell<Vec<(Action, Map<String, Value>)>>,
    yield_before_respond: Cell<bool>,
}

impl FakeGateway {
    pub fn scripted(responses: impl IntoIterator<Item = Result<Envelope, GatewayError>>) -> Self {
        let gateway = Self::default();
        gateway.inner.script.borrow_mut().extend(responses);
        gateway
    }

    /// Make each call suspend once before responding, so tests can
    /// interleave two sequences at a real await point.
    pub fn yield_before_respond(&self) {
        self.inner.yield_before_respond.set(true);
    }

    pub fn push_response(&self, response: Result<Envelope, GatewayError>) {
        self.inner.script.borrow_mut().push_back(response);
    }

    pub fn calls(&self) -> Vec<(Action, Map<String, Value>)> {
        self.inner.calls.borrow().clone()
    }

    pub fn actions(&self) -> Vec<Action> {
        self.inner.calls.borrow().iter().map(|(a, _)| *a).collect()
    }

    pub fn call_count(&self) -> usize {
        self.inner.calls.borrow().len()
    }
}

impl Gateway for FakeGateway {
    async fn call(&self, action: Action, params: Map<String, Value>) -> Result<Envelope, GatewayError> {
        if self.inner.yield_before_respond.get() {
            YieldOnce::default().await;
        }
        self.inner.calls.borrow_mut().push((action, params));
        self.inner
            .script
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Transport("script exhausted".to_owned())))
    }
}

/// Future that suspends exactly once, then completes.
#[derive(Default)]
struct YieldOnce {
    yielded: bool,
}

impl Future for YieldOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.yielded {
            Poll::Ready(())
        } else {
            self.yielded = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

/// Clock whose sleeps return immediately while advancing a virtual time and
/// recording every requested duration.
#[derive(Clone, Default)]
pub struct FakeClock {
    inner: Rc<FakeClockInner>,
}

#[derive(Default)]
struct FakeClockInner {
    now_ms: Cell<f64>,
    sleeps: RefCell<Vec<Duration>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.inner.sleeps.borrow().clone()
    }

    pub fn sleep_count(&self) -> usize {
        self.inner.sleeps.borrow().len()
    }
}

impl Clock for FakeClock {
    fn now_ms(&self) -> f64 {
        self.inner.now_ms.get()
    }

    async fn sleep(&self, duration: Duration) {
        self.inner.sleeps.borrow_mut().push(duration);
        #[allow(clippy::cast_precision_loss)]
        let elapsed = duration.as_millis() as f64;
        self.inner.now_ms.set(self.inner.now_ms.get() + elapsed);
    }
}

/// Presenter that answers prompts from a script and records notifications.
#[derive(Clone, Default)]
pub struct ScriptedPresenter {
    inner: Rc<ScriptedPresenterInner>,
}

#[derive(Default)]
struct ScriptedPresenterInner {
    choices: RefCell<VecDeque<ReauthChoice>>,
    notes: RefCell<Vec<(NotifyKind, String)>>,
    prompt_count: Cell<usize>,
}

impl ScriptedPresenter {
    pub fn scripted(choices: impl IntoIterator<Item = ReauthChoice>) -> Self {
        let presenter = Self::default();
        presenter.inner.choices.borrow_mut().extend(choices);
        presenter
    }

    pub fn notes(&self) -> Vec<(NotifyKind, String)> {
        self.inner.notes.borrow().clone()
    }

    pub fn prompt_count(&self) -> usize {
        self.inner.prompt_count.get()
    }
}

impl Presenter for ScriptedPresenter {
    fn notify(&self, kind: NotifyKind, message: &str) {
        self.inner.notes.borrow_mut().push((kind, message.to_owned()));
    }

    async fn prompt_reauthentication(&self) -> ReauthChoice {
        self.inner.prompt_count.set(self.inner.prompt_count.get() + 1);
        // An exhausted script dismisses so a broken test can't loop forever.
        self.inner
            .choices
            .borrow_mut()
            .pop_front()
            .unwrap_or(ReauthChoice::Dismiss)
    }
}
