use super::*;

use futures::executor::block_on;

use crate::recovery::{OperationKind, PendingOperation};
use crate::state::SessionState;
use crate::testkit::{
    FakeClock, FakeGateway, ScriptedPresenter, ok_session, rejected, transport_down,
};

fn credentials() -> Credentials {
    Credentials {
        username: "dana@clinic.example".to_owned(),
        password: "correct horse".to_owned(),
    }
}

fn appointment_payload() -> Map<String, Value> {
    let mut payload = Map::new();
    payload.insert("pet_id".to_owned(), Value::from(4));
    payload.insert("slot".to_owned(), Value::from("2024-06-01T10:00"));
    payload
}

/// Guard driven into `Expired` by consuming three scripted failures.
fn expired_guard(gateway: &FakeGateway, clock: &FakeClock) -> SessionGuard<FakeGateway, FakeClock> {
    let guard = SessionGuard::new(gateway.clone(), clock.clone());
    assert_eq!(block_on(guard.validate()), SessionState::Expired);
    guard
}

fn expiry_script() -> [Result<wire::Envelope, crate::gateway::GatewayError>; 3] {
    [transport_down(), transport_down(), transport_down()]
}

// =============================================================
// Retry choice
// =============================================================

#[test]
fn retry_recovery_replays_the_interrupted_appointment_once() {
    let gateway = FakeGateway::scripted(expiry_script());
    gateway.push_response(ok_session());
    gateway.push_response(ok_session());
    let clock = FakeClock::new();
    let guard = expired_guard(&gateway, &clock);

    let recovery = RecoveryCoordinator::new();
    recovery.save(PendingOperation {
        kind: OperationKind::Appointment,
        payload: appointment_payload(),
    });

    let presenter = ScriptedPresenter::scripted([ReauthChoice::Retry]);
    let outcome = block_on(run_expiry_flow(&guard, &recovery, &presenter));

    assert_eq!(outcome, FlowOutcome::Recovered { replayed: true });
    assert_eq!(guard.state(), SessionState::Valid);
    assert!(!recovery.has_pending());

    let calls = gateway.calls();
    assert_eq!(calls.len(), 5);
    assert_eq!(calls[3].0, Action::CheckSession);
    assert_eq!(calls[4].0, Action::BookAppointment);
    assert_eq!(calls[4].1, appointment_payload());

    let notes = presenter.notes();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].0, NotifyKind::Success);
}

#[test]
fn failed_retry_reprompts_until_the_user_gives_up() {
    let gateway = FakeGateway::scripted(expiry_script());
    for response in expiry_script() {
        gateway.push_response(response);
    }
    let clock = FakeClock::new();
    let guard = expired_guard(&gateway, &clock);

    let recovery = RecoveryCoordinator::new();
    recovery.save(PendingOperation {
        kind: OperationKind::Booking,
        payload: Map::new(),
    });

    let presenter = ScriptedPresenter::scripted([ReauthChoice::Retry, ReauthChoice::Dismiss]);
    let outcome = block_on(run_expiry_flow(&guard, &recovery, &presenter));

    assert_eq!(outcome, FlowOutcome::Dismissed);
    assert_eq!(presenter.prompt_count(), 2);
    assert!(!recovery.has_pending());

    let notes = presenter.notes();
    assert_eq!(notes[0].0, NotifyKind::Error);
    assert_eq!(notes[1].0, NotifyKind::Info);
}

// =============================================================
// Login choice
// =============================================================

#[test]
fn login_recovery_issues_login_then_validates() {
    let gateway = FakeGateway::scripted(expiry_script());
    gateway.push_response(ok_session());
    gateway.push_response(ok_session());
    let clock = FakeClock::new();
    let guard = expired_guard(&gateway, &clock);
    let recovery = RecoveryCoordinator::new();

    let presenter = ScriptedPresenter::scripted([ReauthChoice::Login(credentials())]);
    let outcome = block_on(run_expiry_flow(&guard, &recovery, &presenter));

    assert_eq!(outcome, FlowOutcome::Recovered { replayed: false });
    assert_eq!(guard.state(), SessionState::Valid);

    let calls = gateway.calls();
    assert_eq!(calls[3].0, Action::Login);
    assert_eq!(calls[3].1.get("username").and_then(Value::as_str), Some("dana@clinic.example"));
    assert_eq!(calls[4].0, Action::CheckSession);

    let notes = presenter.notes();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].0, NotifyKind::Success);
}

#[test]
fn rejected_login_surfaces_the_gateway_message_and_reprompts() {
    let gateway = FakeGateway::scripted(expiry_script());
    gateway.push_response(rejected("Wrong username or password"));
    let clock = FakeClock::new();
    let guard = expired_guard(&gateway, &clock);
    let recovery = RecoveryCoordinator::new();

    let presenter =
        ScriptedPresenter::scripted([ReauthChoice::Login(credentials()), ReauthChoice::Dismiss]);
    let outcome = block_on(run_expiry_flow(&guard, &recovery, &presenter));

    assert_eq!(outcome, FlowOutcome::Dismissed);
    assert_eq!(presenter.prompt_count(), 2);

    let notes = presenter.notes();
    assert_eq!(notes[0], (NotifyKind::Error, "Wrong username or password".to_owned()));
}

// =============================================================
// Dismiss choice
// =============================================================

#[test]
fn dismiss_with_pending_discards_it_and_says_so() {
    let gateway = FakeGateway::scripted(expiry_script());
    let clock = FakeClock::new();
    let guard = expired_guard(&gateway, &clock);

    let recovery = RecoveryCoordinator::new();
    recovery.save(PendingOperation {
        kind: OperationKind::Appointment,
        payload: appointment_payload(),
    });

    let presenter = ScriptedPresenter::scripted([ReauthChoice::Dismiss]);
    let outcome = block_on(run_expiry_flow(&guard, &recovery, &presenter));

    assert_eq!(outcome, FlowOutcome::Dismissed);
    assert!(!recovery.has_pending());
    assert_eq!(gateway.call_count(), 3);
    assert_eq!(presenter.notes().len(), 1);
    assert_eq!(presenter.notes()[0].0, NotifyKind::Info);
}

#[test]
fn dismiss_without_pending_is_silent() {
    let gateway = FakeGateway::scripted(expiry_script());
    let clock = FakeClock::new();
    let guard = expired_guard(&gateway, &clock);
    let recovery = RecoveryCoordinator::new();

    let presenter = ScriptedPresenter::scripted([ReauthChoice::Dismiss]);
    let outcome = block_on(run_expiry_flow(&guard, &recovery, &presenter));

    assert_eq!(outcome, FlowOutcome::Dismissed);
    assert!(presenter.notes().is_empty());
}

// =============================================================
// submit_operation
// =============================================================

#[test]
fn submit_with_a_live_session_issues_the_operation_directly() {
    let gateway = FakeGateway::scripted([ok_session(), ok_session()]);
    let clock = FakeClock::new();
    let guard = SessionGuard::new(gateway.clone(), clock.clone());
    let recovery = RecoveryCoordinator::new();
    let presenter = ScriptedPresenter::default();

    let sent = block_on(submit_operation(
        &guard,
        &recovery,
        &presenter,
        PendingOperation {
            kind: OperationKind::Appointment,
            payload: appointment_payload(),
        },
    ));

    assert!(sent);
    assert!(!recovery.has_pending());
    assert_eq!(gateway.actions(), vec![Action::CheckSession, Action::BookAppointment]);
    assert_eq!(presenter.prompt_count(), 0);
    assert_eq!(presenter.notes()[0].0, NotifyKind::Success);
}

#[test]
fn submit_interrupted_by_expiry_parks_and_replays_after_recovery() {
    let gateway = FakeGateway::scripted(expiry_script());
    gateway.push_response(ok_session());
    gateway.push_response(ok_session());
    let clock = FakeClock::new();
    let guard = SessionGuard::new(gateway.clone(), clock.clone());
    let recovery = RecoveryCoordinator::new();
    let presenter = ScriptedPresenter::scripted([ReauthChoice::Retry]);

    let sent = block_on(submit_operation(
        &guard,
        &recovery,
        &presenter,
        PendingOperation {
            kind: OperationKind::Appointment,
            payload: appointment_payload(),
        },
    ));

    assert!(sent);
    assert!(!recovery.has_pending());
    assert_eq!(guard.state(), SessionState::Valid);

    // Three exhausted checks, the user-driven recheck, then the replay.
    let calls = gateway.calls();
    assert_eq!(calls.len(), 5);
    assert_eq!(calls[4].0, Action::BookAppointment);
    assert_eq!(calls[4].1, appointment_payload());
}

#[test]
fn submit_abandoned_at_the_prompt_reports_not_sent() {
    let gateway = FakeGateway::scripted(expiry_script());
    let clock = FakeClock::new();
    let guard = SessionGuard::new(gateway.clone(), clock.clone());
    let recovery = RecoveryCoordinator::new();
    let presenter = ScriptedPresenter::scripted([ReauthChoice::Dismiss]);

    let sent = block_on(submit_operation(
        &guard,
        &recovery,
        &presenter,
        PendingOperation {
            kind: OperationKind::Booking,
            payload: Map::new(),
        },
    ));

    assert!(!sent);
    assert!(!recovery.has_pending());
    assert_eq!(gateway.call_count(), 3);
}

#[test]
fn submit_failure_with_a_live_session_is_notified_without_recovery() {
    let gateway = FakeGateway::scripted([ok_session(), rejected("no free slots")]);
    let clock = FakeClock::new();
    let guard = SessionGuard::new(gateway.clone(), clock.clone());
    let recovery = RecoveryCoordinator::new();
    let presenter = ScriptedPresenter::default();

    let sent = block_on(submit_operation(
        &guard,
        &recovery,
        &presenter,
        PendingOperation {
            kind: OperationKind::Appointment,
            payload: appointment_payload(),
        },
    ));

    assert!(!sent);
    assert!(!recovery.has_pending());
    assert_eq!(presenter.notes(), vec![(NotifyKind::Error, "no free slots".to_owned())]);
}

// =============================================================
// Replay failure
// =============================================================

#[test]
fn failed_replay_is_reported_and_never_requeued() {
    let gateway = FakeGateway::scripted(expiry_script());
    gateway.push_response(ok_session());
    gateway.push_response(rejected("slot already taken"));
    let clock = FakeClock::new();
    let guard = expired_guard(&gateway, &clock);

    let recovery = RecoveryCoordinator::new();
    recovery.save(PendingOperation {
        kind: OperationKind::Appointment,
        payload: appointment_payload(),
    });

    let presenter = ScriptedPresenter::scripted([ReauthChoice::Retry]);
    let outcome = block_on(run_expiry_flow(&guard, &recovery, &presenter));

    assert_eq!(outcome, FlowOutcome::Recovered { replayed: true });
    assert!(!recovery.has_pending());

    let notes = presenter.notes();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].0, NotifyKind::Error);
    assert!(notes[0].1.contains("slot already taken"));
    assert!(notes[0].1.contains("appointment"));
}
