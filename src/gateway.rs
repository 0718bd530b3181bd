//! Gateway seam the guard and coordinator issue operations through.
//!
//! SYSTEM CONTEXT
//! ==============
//! The remote endpoint is a single POST target taking action-tagged JSON
//! bodies. Dashboards plug in a browser HTTP implementation; tests plug in
//! scripted fakes. The guard deliberately treats every error variant here —
//! and `success: false` envelopes — identically when counting retries.

#[cfg(test)]
#[path = "gateway_test.rs"]
mod gateway_test;

use serde_json::{Map, Value};
use wire::{Action, Envelope, WireError};

/// Failure to obtain a well-formed envelope from the gateway.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The request never produced an HTTP response (network down, DNS, CORS).
    #[error("transport failure: {0}")]
    Transport(String),
    /// The endpoint answered with a non-success HTTP status.
    #[error("gateway returned HTTP {0}")]
    Status(u16),
    /// The response body was not a valid envelope.
    #[error(transparent)]
    Wire(#[from] WireError),
}

/// A single remote endpoint accepting action-tagged JSON bodies.
///
/// Implementations own transport only. Retry, backoff, and failure
/// classification belong to the callers.
pub trait Gateway {
    /// Issue one action with its parameters and return the parsed envelope.
    ///
    /// An `Ok` envelope may still carry `success: false`; that distinction
    /// is the caller's to interpret.
    async fn call(&self, action: Action, params: Map<String, Value>) -> Result<Envelope, GatewayError>;
}

impl<G: Gateway> Gateway for &G {
    async fn call(&self, action: Action, params: Map<String, Value>) -> Result<Envelope, GatewayError> {
        (*self).call(action, params).await
    }
}
