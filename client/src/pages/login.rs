//! Login page for both dashboards.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;

/// Validate the login form before issuing the `login` action.
fn validate_login_inputs(username: &str, password: &str) -> Result<(String, String), &'static str> {
    let username = username.trim();
    if username.is_empty() {
        return Err("Enter your username first.");
    }
    if password.is_empty() {
        return Err("Enter your password.");
    }
    Ok((username.to_owned(), password.to_owned()))
}

/// Login page — username/password form posting the `login` action.
/// Redirects to the portal on success.
#[component]
pub fn LoginPage() -> impl IntoView {
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_sign_in = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (username_value, password_value) =
            match validate_login_inputs(&username.get(), &password.get()) {
                Ok(values) => values,
                Err(message) => {
                    info.set(message.to_owned());
                    return;
                }
            };
        busy.set(true);
        info.set("Signing in...".to_owned());

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let gateway = crate::net::api::HttpGateway::new();
            match crate::net::api::login(&gateway, &username_value, &password_value).await {
                Ok(()) => {
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().set_href("/");
                    }
                }
                Err(message) => {
                    info.set(message);
                    busy.set(false);
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (username_value, password_value);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"VetDesk"</h1>
                <p class="login-card__subtitle">"Sign in to your clinic account"</p>
                <form class="login-form" on:submit=on_sign_in>
                    <input
                        class="login-input"
                        type="text"
                        placeholder="Username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Sign In"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-info">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
