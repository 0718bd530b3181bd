//! Gateway adapter for the clinic's single JSON endpoint.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`. Server-side: stubs
//! returning transport errors since the endpoint is only reachable from the
//! browser.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx statuses and malformed envelopes surface as `GatewayError`
//! variants; the guard counts them identically, so nothing here retries.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde_json::{Map, Value};
use vetdesk::{Gateway, GatewayError};
use wire::{Action, Envelope};

use super::types::{UserInfo, parse_user_info};

/// Fixed relative path of the gateway endpoint.
pub const GATEWAY_ENDPOINT: &str = "/api/gateway";

/// [`Gateway`] implementation posting action-tagged bodies to
/// [`GATEWAY_ENDPOINT`].
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpGateway;

impl HttpGateway {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Gateway for HttpGateway {
    async fn call(&self, action: Action, params: Map<String, Value>) -> Result<Envelope, GatewayError> {
        #[cfg(feature = "hydrate")]
        {
            let request_id = uuid::Uuid::new_v4();
            let body = wire::encode_request(action, &params);
            let response = gloo_net::http::Request::post(GATEWAY_ENDPOINT)
                .json(&body)
                .map_err(|e| GatewayError::Transport(e.to_string()))?
                .send()
                .await
                .map_err(|e| GatewayError::Transport(e.to_string()))?;
            if !response.ok() {
                return Err(GatewayError::Status(response.status()));
            }
            let text = response
                .text()
                .await
                .map_err(|e| GatewayError::Transport(e.to_string()))?;
            let envelope = wire::parse_envelope(&text)?;
            leptos::logging::log!(
                "gateway {action} [{request_id}] success={}",
                envelope.success
            );
            Ok(envelope)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (action, params);
            Err(GatewayError::Transport("not available on server".to_owned()))
        }
    }
}

/// Build the `login` parameter map.
#[must_use]
pub fn login_params(username: &str, password: &str) -> Map<String, Value> {
    let mut params = Map::new();
    params.insert("username".to_owned(), Value::String(username.to_owned()));
    params.insert("password".to_owned(), Value::String(password.to_owned()));
    params
}

/// Sign in with credentials.
///
/// # Errors
///
/// Returns the gateway's message (or a transport description) when the
/// sign-in does not succeed.
pub async fn login<G: Gateway>(gateway: &G, username: &str, password: &str) -> Result<(), String> {
    match gateway.call(Action::Login, login_params(username, password)).await {
        Ok(envelope) if envelope.success => Ok(()),
        Ok(envelope) => Err(envelope
            .message
            .unwrap_or_else(|| "Sign-in was rejected.".to_owned())),
        Err(error) => Err(error.to_string()),
    }
}

/// Fetch the authenticated user's profile.
/// Returns `None` when not signed in or on any failure.
pub async fn fetch_user_info<G: Gateway>(gateway: &G) -> Option<UserInfo> {
    match gateway.call(Action::GetUserInfo, Map::new()).await {
        Ok(envelope) if envelope.success => parse_user_info(envelope.data.as_ref()),
        _ => None,
    }
}
