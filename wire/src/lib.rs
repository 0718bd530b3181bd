//! Shared wire contract for the VetDesk API gateway.
//!
//! This crate owns the request/response representation used by both
//! dashboard crates: action-tagged JSON request bodies and the
//! `{success, message?, data?}` response envelope. It intentionally keeps
//! request parameters flexible (`serde_json::Map`) so dashboard code can
//! remain schema-driven while the action registry stays typed.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Error returned by request/envelope decoding.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// The request body is not a JSON object.
    #[error("request body is not a JSON object")]
    NonObjectBody,
    /// The request body has no string `action` field.
    #[error("request body has no action field")]
    MissingAction,
    /// The `action` string does not map to a known [`Action`].
    #[error("unknown action: {0}")]
    UnknownAction(String),
    /// The response body could not be parsed as an [`Envelope`].
    #[error("malformed response envelope: {0}")]
    MalformedEnvelope(String),
}

/// Operation names accepted by the remote gateway endpoint.
///
/// Session-lifecycle actions plus the replayable dashboard operations. The
/// wire form is the snake_case string carried in the request `action` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Validate the current session cookie.
    CheckSession,
    /// Fetch identity/profile data for the logged-in user.
    GetUserInfo,
    /// Establish a new session from credentials.
    Login,
    /// Invalidate the current session.
    Logout,
    /// Create a clinic appointment (replayable).
    BookAppointment,
    /// Create a service booking such as grooming or boarding (replayable).
    CreateBooking,
}

impl Action {
    /// Wire string carried in the request `action` field.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CheckSession => "check_session",
            Self::GetUserInfo => "get_user_info",
            Self::Login => "login",
            Self::Logout => "logout",
            Self::BookAppointment => "book_appointment",
            Self::CreateBooking => "create_booking",
        }
    }

    /// Parse an action from its wire string.
    fn from_str(value: &str) -> Result<Self, WireError> {
        match value {
            "check_session" => Ok(Self::CheckSession),
            "get_user_info" => Ok(Self::GetUserInfo),
            "login" => Ok(Self::Login),
            "logout" => Ok(Self::Logout),
            "book_appointment" => Ok(Self::BookAppointment),
            "create_booking" => Ok(Self::CreateBooking),
            other => Err(WireError::UnknownAction(other.to_owned())),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response envelope returned by every gateway action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Whether the action succeeded server-side.
    pub success: bool,
    /// Human-readable outcome text, if the server provided one.
    #[serde(default)]
    pub message: Option<String>,
    /// Action-specific payload, if any.
    #[serde(default)]
    pub data: Option<Value>,
}

impl Envelope {
    /// Successful envelope carrying `data`.
    #[must_use]
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    /// Failed envelope carrying a message.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }

    /// Read a boolean flag out of `data`, defaulting to `false`.
    #[must_use]
    pub fn data_flag(&self, key: &str) -> bool {
        self.data
            .as_ref()
            .and_then(|d| d.get(key))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

/// Encode a request body: the action tag merged with its parameters.
///
/// Parameters named `action` are shadowed by the action tag so the wire
/// field stays authoritative.
#[must_use]
pub fn encode_request(action: Action, params: &Map<String, Value>) -> Value {
    let mut body = params.clone();
    body.insert("action".to_owned(), Value::String(action.as_str().to_owned()));
    Value::Object(body)
}

/// Decode a request body back into its action and parameters.
///
/// # Errors
///
/// Returns [`WireError`] if the body is not an object, the `action` field is
/// missing or non-string, or the action name is unknown.
pub fn decode_request(body: &Value) -> Result<(Action, Map<String, Value>), WireError> {
    let Value::Object(fields) = body else {
        return Err(WireError::NonObjectBody);
    };
    let action = fields
        .get("action")
        .and_then(Value::as_str)
        .ok_or(WireError::MissingAction)?;
    let action = Action::from_str(action)?;

    let mut params = fields.clone();
    params.remove("action");
    Ok((action, params))
}

/// Parse a response body into an [`Envelope`].
///
/// # Errors
///
/// Returns [`WireError::MalformedEnvelope`] when the text is not valid JSON
/// or lacks the required `success` field. Callers treat this the same as a
/// transport failure.
pub fn parse_envelope(text: &str) -> Result<Envelope, WireError> {
    serde_json::from_str(text).map_err(|e| WireError::MalformedEnvelope(e.to_string()))
}
