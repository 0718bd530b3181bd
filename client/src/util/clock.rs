//! Browser implementation of the core's clock seam.
//!
//! Delays go through `gloo-timers`; timestamps come from `js_sys::Date`.
//! Requires a browser environment; server-side paths no-op so native test
//! builds stay deterministic.

use std::time::Duration;

use vetdesk::Clock;

/// [`Clock`] backed by the browser event loop.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now_ms(&self) -> f64 {
        #[cfg(feature = "hydrate")]
        {
            js_sys::Date::now()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            0.0
        }
    }

    async fn sleep(&self, duration: Duration) {
        #[cfg(feature = "hydrate")]
        {
            gloo_timers::future::sleep(duration).await;
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = duration;
        }
    }
}
