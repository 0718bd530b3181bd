//! Staff desk: appointment creation for the front desk.
//!
//! SYSTEM CONTEXT
//! ==============
//! Staff-only route with its own session controller, independent of the
//! client portal's. Client-role accounts are redirected back to the portal.

#[cfg(test)]
#[path = "staff_dashboard_test.rs"]
mod staff_dashboard_test;

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
use crate::util::auth::{install_staff_only_redirect, install_unauth_redirect};

/// Build the `book_appointment` payload from the front-desk form.
fn staff_appointment_payload(
    client: &str,
    pet: &str,
    slot: &str,
) -> Result<Map<String, Value>, &'static str> {
    let client = client.trim();
    let pet = pet.trim();
    let slot = slot.trim();
    if client.is_empty() || pet.is_empty() || slot.is_empty() {
        return Err("Client, pet, and time slot are all required.");
    }
    let mut payload = Map::new();
    payload.insert("client".to_owned(), Value::String(client.to_owned()));
    payload.insert("pet".to_owned(), Value::String(pet.to_owned()));
    payload.insert("slot".to_owned(), Value::String(slot.to_owned()));
    payload.insert("booked_by".to_owned(), Value::String("staff".to_owned()));
    Ok(payload)
}

/// Staff desk page.
#[component]
pub fn StaffDeskPage() -> impl IntoView {
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
    install_staff_only_redirect(auth, use_navigate());

    let client = RwSignal::new(String::new());
    let pet = RwSignal::new(String::new());
    let slot = RwSignal::new(String::new());
    let form_error = RwSignal::new(String::new());

    let submit_session = session.clone();
    let on_create_appointment = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        match staff_appointment_payload(&client.get(), &pet.get(), &slot.get()) {
            Ok(payload) => {
                form_error.set(String::new());
                submit_session.submit(OperationKind::Appointment, payload);
            }
            Err(message) => form_error.set(message.to_owned()),
        }
    };

    let sign_out_session = session.clone();
    let presenter = session.presenter.clone();

    view! {
        <div class="dashboard dashboard--staff">
            <header class="dashboard__header">
                <h1>"Front Desk"</h1>
                <span class="dashboard__session">{move || session_view.get().status_label()}</span>
                <button class="dashboard__signout" on:click=move |_| sign_out_session.sign_out()>
                    "Sign out"
                </button>
            </header>

            <section class="panel panel--appointment">
                <h2>"Create an appointment"</h2>
                <form on:submit=on_create_appointment>
                    <input
                        type="text"
                        placeholder="Client name"
                        prop:value=move || client.get()
                        on:input=move |ev| client.set(event_target_value(&ev))
                    />
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
                    <button type="submit">"Create"</button>
                </form>
                <Show when=move || !form_error.get().is_empty()>
                    <p class="panel__error">{move || form_error.get()}</p>
                </Show>
            </section>

            <ToastStack ui/>
            <ReauthDialog ui presenter/>
        </div>
    }
}
