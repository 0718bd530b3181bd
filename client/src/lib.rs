//! Browser dashboards for the VetDesk clinic.
//!
//! ARCHITECTURE
//! ============
//! Two route-level dashboards (client portal, staff desk) each embed their
//! own session controller built from the `vetdesk` core: a gloo-net gateway
//! adapter, a browser clock, and a signal-backed presenter. Everything
//! browser-specific is gated behind the `hydrate` feature with SSR-safe
//! stubs so the pure logic compiles and tests natively.

pub mod app;
pub mod components;
pub mod controller;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: install logging/panic hooks and mount the app.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_body(app::App);
}
