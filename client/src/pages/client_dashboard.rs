//! Client portal: appointment requests and service bookings.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route for pet owners. It owns its own
//! session controller; submits go through the controller so an expired
//! session parks the request and replays it after sign-in.

#[cfg(test)]
#[path = "client_dashboard_test.rs"]
mod client_dashboard_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use serde_json::{Map, Value};

use vetdesk::OperationKind;

use crate::components::reauth_dialog::ReauthDialog;
use crate::components::toast_stack::ToastStack;
use crate::controller::DashboardSession;
use crate::state::auth::AuthState;
use crate::state::session::SessionView;
use crate::state::ui::UiState;
use crate::util::auth::install_unauth_redirect;

/// Build the `book_appointment` payload from the request form.
fn appointment_request_payload(
    pet: &str,
    slot: &str,
    reason: &str,
) -> Result<Map<String, Value>, &'static str> {
    let pet = pet.trim();
    let slot = slot.trim();
    let reason = reason.trim();
    if pet.is_empty() || slot.is_empty() {
        return Err("Enter your pet's name and a preferred time.");
    }
    let mut payload = Map::new();
    payload.insert("pet".to_owned(), Value::String(pet.to_owned()));
    payload.insert("slot".to_owned(), Value::String(slot.to_owned()));
    if !reason.is_empty() {
        payload.insert("reason".to_owned(), Value::String(reason.to_owned()));
    }
    Ok(payload)
}

/// Build the `create_booking` payload from the booking form.
fn booking_request_payload(service: &str, pet: &str) -> Result<Map<String, Value>, &'static str> {
    let service = service.trim();
    let pet = pet.trim();
    if service.is_empty() || pet.is_empty() {
        return Err("Pick a service and enter your pet's name.");
    }
    let mut payload = Map::new();
    payload.insert("service".to_owned(), Value::String(service.to_owned()));
    payload.insert("pet".to_owned(), Value::String(pet.to_owned()));
    Ok(payload)
}

/// Client portal page.
#[component]
pub fn ClientDashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let ui = RwSignal::new(UiState::new());
    let session_view = RwSignal::new(SessionView::default());

    let session = DashboardSession::new(auth, ui, session_view);
    session.start();
    {
        let session = session.clone();
        on_cleanup(move || session.stop());
    }
    install_unauth_redirect(auth, use_navigate());

    let pet = RwSignal::new(String::new());
    let slot = RwSignal::new(String::new());
    let reason = RwSignal::new(String::new());
    let appointment_error = RwSignal::new(String::new());

    let service = RwSignal::new("grooming".to_owned());
    let booking_pet = RwSignal::new(String::new());
    let booking_error = RwSignal::new(String::new());

    let appointment_session = session.clone();
    let on_request_appointment = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        match appointment_request_payload(&pet.get(), &slot.get(), &reason.get()) {
            Ok(payload) => {
                appointment_error.set(String::new());
                appointment_session.submit(OperationKind::Appointment, payload);
            }
            Err(message) => appointment_error.set(message.to_owned()),
        }
    };

    let booking_session = session.clone();
    let on_book_service = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        match booking_request_payload(&service.get(), &booking_pet.get()) {
            Ok(payload) => {
                booking_error.set(String::new());
                booking_session.submit(OperationKind::Booking, payload);
            }
            Err(message) => booking_error.set(message.to_owned()),
        }
    };

    let sign_out_session = session.clone();
    let presenter = session.presenter.clone();

    view! {
        <div class="dashboard dashboard--client">
            <header class="dashboard__header">
                <h1>"My Clinic"</h1>
                <span class="dashboard__session">{move || session_view.get().status_label()}</span>
                <span class="dashboard__user">
                    {move || auth.get().user.map(|u| u.name).unwrap_or_default()}
                </span>
                <button class="dashboard__signout" on:click=move |_| sign_out_session.sign_out()>
                    "Sign out"
                </button>
            </header>

            <Show when=move || session_view.get().last_warning.is_some()>
                <p class="dashboard__warning">
                    {move || session_view.get().last_warning.unwrap_or_default()}
                </p>
            </Show>

            <section class="panel panel--appointment">
                <h2>"Request an appointment"</h2>
                <form on:submit=on_request_appointment>
                    <input
                        type="text"
                        placeholder="Pet's name"
                        prop:value=move || pet.get()
                        on:input=move |ev| pet.set(event_target_value(&ev))
                    />
                    <input
                        type="datetime-local"
                        prop:value=move || slot.get()
                        on:input=move |ev| slot.set(event_target_value(&ev))
                    />
                    <input
                        type="text"
                        placeholder="Reason (optional)"
                        prop:value=move || reason.get()
                        on:input=move |ev| reason.set(event_target_value(&ev))
                    />
                    <button type="submit">"Request"</button>
                </form>
                <Show when=move || !appointment_error.get().is_empty()>
                    <p class="panel__error">{move || appointment_error.get()}</p>
                </Show>
            </section>

            <section class="panel panel--booking">
                <h2>"Book a service"</h2>
                <form on:submit=on_book_service>
                    <select on:change=move |ev| service.set(event_target_value(&ev))>
                        <option value="grooming">"Grooming"</option>
                        <option value="boarding">"Boarding"</option>
                        <option value="daycare">"Daycare"</option>
                    </select>
                    <input
                        type="text"
                        placeholder="Pet's name"
                        prop:value=move || booking_pet.get()
                        on:input=move |ev| booking_pet.set(event_target_value(&ev))
                    />
                    <button type="submit">"Book"</button>
                </form>
                <Show when=move || !booking_error.get().is_empty()>
                    <p class="panel__error">{move || booking_error.get()}</p>
                </Show>
            </section>

            <ToastStack ui/>
            <ReauthDialog ui presenter/>
        </div>
    }
}
