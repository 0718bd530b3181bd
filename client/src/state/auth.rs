//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and user-aware components to coordinate login
//! redirects and role-dependent rendering.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::UserInfo;

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, Default)]
pub struct AuthState {
    /// Profile of the signed-in user, once fetched.
    pub user: Option<UserInfo>,
    /// True until the first profile fetch resolves.
    pub loading: bool,
}

impl AuthState {
    /// Initial state: nothing known yet, fetch in flight.
    #[must_use]
    pub fn loading() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }

    /// Record the outcome of a profile fetch.
    pub fn resolve(&mut self, user: Option<UserInfo>) {
        self.user = user;
        self.loading = false;
    }

    /// Whether this account may use the staff desk.
    #[must_use]
    pub fn is_staff(&self) -> bool {
        self.user.as_ref().is_some_and(UserInfo::is_staff)
    }
}
