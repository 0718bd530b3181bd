//! Time seam for the retry and re-check loops.
//!
//! Unit tests substitute an immediate clock so every delay-dependent
//! property runs without real timers. The browser implementation lives in
//! the `client` crate (gloo-timers + `js_sys::Date`).

use std::time::Duration;

/// Injectable wall-clock reads and cooperative delays.
pub trait Clock {
    /// Milliseconds since an arbitrary epoch; only differences are meaningful.
    fn now_ms(&self) -> f64;

    /// Suspend the current task for `duration`.
    async fn sleep(&self, duration: Duration);
}

impl<C: Clock> Clock for &C {
    fn now_ms(&self) -> f64 {
        (*self).now_ms()
    }

    async fn sleep(&self, duration: Duration) {
        (*self).sleep(duration).await;
    }
}
