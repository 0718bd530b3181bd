//! Dashboard state models.
//!
//! ARCHITECTURE
//! ============
//! Plain structs held in `RwSignal`s provided via context. Domain state
//! (`auth`, `session`) is kept apart from UI chrome (`ui`) so the session
//! core never learns about toasts or dialogs.

pub mod auth;
pub mod session;
pub mod ui;
