//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components should apply identical unauthenticated redirect
//! behavior, and the staff desk additionally turns away client accounts.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::auth::AuthState;

/// Whether an unauthenticated redirect should fire for this auth state.
#[must_use]
pub fn should_redirect_to_login(auth: &AuthState) -> bool {
    !auth.loading && auth.user.is_none()
}

/// Whether a signed-in user must be turned away from the staff desk.
#[must_use]
pub fn should_redirect_non_staff(auth: &AuthState) -> bool {
    !auth.loading && auth.user.is_some() && !auth.is_staff()
}

/// Redirect to `/login` whenever auth has loaded and no user is present.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if should_redirect_to_login(&auth.get()) {
            navigate("/login", NavigateOptions::default());
        }
    });
}

/// Redirect client-role accounts from the staff desk back to the portal.
pub fn install_staff_only_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if should_redirect_non_staff(&auth.get()) {
            navigate("/", NavigateOptions::default());
        }
    });
}
