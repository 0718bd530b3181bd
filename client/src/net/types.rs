//! DTOs for gateway response payloads the dashboards consume.
//!
//! DESIGN
//! ======
//! These types mirror the server's `data` payloads so serde stays lossless
//! while dashboard code works with typed fields. Numeric ids are accepted as
//! any JSON number because the backend is not strict about integer vs.
//! float encoding.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// The authenticated user as returned by `get_user_info`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    /// Database identifier.
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Contact email, if on file.
    #[serde(default)]
    pub email: Option<String>,
    /// Account role: `"client"` or `"staff"`.
    pub role: String,
}

impl UserInfo {
    /// Whether this account may use the staff desk.
    #[must_use]
    pub fn is_staff(&self) -> bool {
        self.role == "staff"
    }
}

/// Extract the user object from a `check_session`/`get_user_info` payload.
///
/// Accepts both `{"user": {...}}` and a bare user object so either response
/// shape keeps working.
#[must_use]
pub fn parse_user_info(data: Option<&Value>) -> Option<UserInfo> {
    let data = data?;
    let candidate = data.get("user").unwrap_or(data);
    serde_json::from_value(candidate.clone()).ok()
}

fn deserialize_i64_from_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Ok(int);
            }
            #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
            if let Some(float) = number.as_f64()
                && float.is_finite()
                && float.fract() == 0.0
                && float >= i64::MIN as f64
                && float <= i64::MAX as f64
            {
                return Ok(float as i64);
            }
            Err(D::Error::custom("expected integer-compatible number"))
        }
        _ => Err(D::Error::custom("expected number")),
    }
}
