//! Expiry flow: prompt, reauthenticate, replay.
//!
//! SYSTEM CONTEXT
//! ==============
//! Runs once per transition into `Expired`. Loops on the presenter's prompt
//! until the session is live again or the user dismisses; a recovered
//! session then replays the pending operation (if any) exactly once and
//! reports the outcome. The user is never redirected without choosing.

#[cfg(test)]
#[path = "reauth_test.rs"]
mod reauth_test;

use serde_json::{Map, Value};
use wire::Action;

use crate::clock::Clock;
use crate::gateway::Gateway;
use crate::guard::SessionGuard;
use crate::presenter::{Credentials, NotifyKind, Presenter, ReauthChoice};
use crate::recovery::{PendingOperation, RecoveryCoordinator, ReplayOutcome};

/// Terminal result of one expiry flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowOutcome {
    /// The session is live again.
    Recovered {
        /// Whether a pending operation was replayed on the way out.
        replayed: bool,
    },
    /// The user dismissed the prompt; any pending operation was discarded.
    Dismissed,
}

/// Drive the session-expired prompt until recovery or dismissal.
pub async fn run_expiry_flow<G, C, P>(
    guard: &SessionGuard<G, C>,
    recovery: &RecoveryCoordinator,
    presenter: &P,
) -> FlowOutcome
where
    G: Gateway,
    C: Clock,
    P: Presenter,
{
    loop {
        match presenter.prompt_reauthentication().await {
            ReauthChoice::Retry => {
                if guard.reauthenticate().await {
                    return finish_recovery(guard, recovery, presenter).await;
                }
                presenter.notify(
                    NotifyKind::Error,
                    "Still unable to confirm your session. Try again or sign in.",
                );
            }
            ReauthChoice::Login(credentials) => {
                if login(guard, presenter, credentials).await && guard.reauthenticate().await {
                    return finish_recovery(guard, recovery, presenter).await;
                }
            }
            ReauthChoice::Dismiss => {
                if recovery.has_pending() {
                    recovery.discard();
                    presenter.notify(NotifyKind::Info, "Your unsent request was discarded.");
                }
                return FlowOutcome::Dismissed;
            }
        }
    }
}

/// Submit a user operation with expiry interception.
///
/// The session is re-validated first. If it is live the operation goes
/// straight to the gateway; otherwise the operation is parked with the
/// coordinator and the expiry flow takes over, replaying it once the user
/// recovers the session. Returns whether the operation was issued (directly
/// or via replay).
pub async fn submit_operation<G, C, P>(
    guard: &SessionGuard<G, C>,
    recovery: &RecoveryCoordinator,
    presenter: &P,
    operation: PendingOperation,
) -> bool
where
    G: Gateway,
    C: Clock,
    P: Presenter,
{
    if !guard.validate().await.is_live() {
        recovery.save(operation);
        return matches!(
            run_expiry_flow(guard, recovery, presenter).await,
            FlowOutcome::Recovered { .. }
        );
    }

    let kind = operation.kind;
    match guard.gateway().call(kind.action(), operation.payload).await {
        Ok(envelope) if envelope.success => {
            let message = envelope
                .message
                .unwrap_or_else(|| format!("Your {} went through.", kind.label()));
            presenter.notify(NotifyKind::Success, &message);
            true
        }
        Ok(envelope) => {
            let message = envelope
                .message
                .unwrap_or_else(|| format!("Your {} was rejected.", kind.label()));
            presenter.notify(NotifyKind::Error, &message);
            false
        }
        Err(error) => {
            log::warn!("{} submit failed: {error}", kind.label());
            presenter.notify(
                NotifyKind::Error,
                &format!("Your {} could not be sent: {error}", kind.label()),
            );
            false
        }
    }
}

/// Issue the `login` action with the collected credentials.
async fn login<G, C, P>(guard: &SessionGuard<G, C>, presenter: &P, credentials: Credentials) -> bool
where
    G: Gateway,
    C: Clock,
    P: Presenter,
{
    let mut params = Map::new();
    params.insert("username".to_owned(), Value::String(credentials.username));
    params.insert("password".to_owned(), Value::String(credentials.password));

    match guard.gateway().call(Action::Login, params).await {
        Ok(envelope) if envelope.success => true,
        Ok(envelope) => {
            let message = envelope
                .message
                .unwrap_or_else(|| "Sign-in was rejected.".to_owned());
            presenter.notify(NotifyKind::Error, &message);
            false
        }
        Err(error) => {
            log::warn!("login call failed: {error}");
            presenter.notify(NotifyKind::Error, "Sign-in failed. Check your connection.");
            false
        }
    }
}

/// Replay the pending operation (if any) and report how recovery went.
async fn finish_recovery<G, C, P>(
    guard: &SessionGuard<G, C>,
    recovery: &RecoveryCoordinator,
    presenter: &P,
) -> FlowOutcome
where
    G: Gateway,
    C: Clock,
    P: Presenter,
{
    match recovery.resume(guard.gateway()).await {
        ReplayOutcome::Idle => {
            presenter.notify(NotifyKind::Success, "You're signed back in.");
            FlowOutcome::Recovered { replayed: false }
        }
        ReplayOutcome::Completed { kind, envelope } => {
            let message = envelope
                .message
                .unwrap_or_else(|| format!("Your {} went through.", kind.label()));
            presenter.notify(NotifyKind::Success, &message);
            FlowOutcome::Recovered { replayed: true }
        }
        ReplayOutcome::Failed { kind, error } => {
            log::warn!("replay of pending {} failed: {error}", kind.label());
            presenter.notify(
                NotifyKind::Error,
                &format!("Signed back in, but your {} failed: {error}", kind.label()),
            );
            FlowOutcome::Recovered { replayed: true }
        }
    }
}
