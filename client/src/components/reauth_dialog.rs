//! Session-expired dialog: retry, sign back in, or dismiss.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered whenever the presenter opens a prompt. Each button resolves the
//! awaiting expiry flow through [`DialogPresenter::resolve_prompt`]; the
//! dialog itself never talks to the guard.

#[cfg(test)]
#[path = "reauth_dialog_test.rs"]
mod reauth_dialog_test;

use leptos::prelude::*;

use vetdesk::{Credentials, ReauthChoice};

use crate::state::ui::UiState;
use crate::util::presenter::DialogPresenter;

/// Validate the re-login form before handing credentials to the flow.
fn validate_relogin_inputs(username: &str, password: &str) -> Result<Credentials, &'static str> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err("Enter your username and password.");
    }
    Ok(Credentials {
        username: username.to_owned(),
        password: password.to_owned(),
    })
}

/// Blocking session-expired dialog.
#[component]
pub fn ReauthDialog(ui: RwSignal<UiState>, presenter: DialogPresenter) -> impl IntoView {
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let form_error = RwSignal::new(String::new());

    let retry_presenter = presenter.clone();
    let dismiss_presenter = presenter.clone();
    let login_presenter = presenter.clone();

    let on_sign_in = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        match validate_relogin_inputs(&username.get(), &password.get()) {
            Ok(credentials) => {
                form_error.set(String::new());
                password.set(String::new());
                login_presenter.resolve_prompt(ReauthChoice::Login(credentials));
            }
            Err(message) => form_error.set(message.to_owned()),
        }
    };

    view! {
        <Show when=move || ui.get().reauth_dialog_open>
            <div class="dialog-backdrop">
                <div class="dialog dialog--reauth">
                    <h2>"Session expired"</h2>
                    <p>"Your session could not be confirmed. Sign back in to continue — any unsent request will be retried for you."</p>
                    <button
                        class="dialog__retry"
                        on:click={
                            let presenter = retry_presenter.clone();
                            move |_| presenter.resolve_prompt(ReauthChoice::Retry)
                        }
                    >
                        "Try again"
                    </button>
                    <form class="dialog__login" on:submit=on_sign_in.clone()>
                        <input
                            type="text"
                            placeholder="Username"
                            prop:value=move || username.get()
                            on:input=move |ev| username.set(event_target_value(&ev))
                        />
                        <input
                            type="password"
                            placeholder="Password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                        <button type="submit">"Sign in"</button>
                    </form>
                    <Show when=move || !form_error.get().is_empty()>
                        <p class="dialog__error">{move || form_error.get()}</p>
                    </Show>
                    <button
                        class="dialog__dismiss"
                        on:click={
                            let presenter = dismiss_presenter.clone();
                            move |_| presenter.resolve_prompt(ReauthChoice::Dismiss)
                        }
                    >
                        "Not now"
                    </button>
                </div>
            </div>
        </Show>
    }
}
