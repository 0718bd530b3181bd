//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration — its session controller,
//! redirects, and form handling — and delegates chrome to `components`.

pub mod client_dashboard;
pub mod login;
pub mod staff_dashboard;
