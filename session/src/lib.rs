//! Shared session credential model for the metro operations console.
//!
//! This crate owns the `metro-session` cookie payload used by both `server`
//! (request gate, `/api/auth/me`) and `client` (auth check). The credential is
//! a JSON envelope `{"user": {...}}`; [`decode`] is the one place that decides
//! whether a raw value names a usable user.

pub mod routes;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Cookie carrying the serialized session envelope.
pub const SESSION_COOKIE_NAME: &str = "metro-session";

/// Error returned by [`decode`] and [`validate_user`].
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The raw credential is not JSON.
    #[error("malformed credential: {0}")]
    Malformed(serde_json::Error),
    /// The credential parsed but does not carry a complete user record.
    #[error("incomplete user record: {0}")]
    Incomplete(&'static str),
}

/// Identity payload embedded in a session credential.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Stable user identifier.
    pub id: String,
    /// Login name.
    pub username: String,
    /// Human-readable name shown in the header.
    #[serde(default, alias = "nombre")]
    pub display_name: String,
    /// Operator role (e.g. `"admin"`, `"operador"`).
    #[serde(default, alias = "rol")]
    pub role: String,
    /// Contact address, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserRecord {
    /// `true` when both `id` and `username` are non-empty.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.id.is_empty() && !self.username.is_empty()
    }
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    user: &'a UserRecord,
}

/// Serialize a user into the credential envelope.
#[must_use]
pub fn encode(user: &UserRecord) -> String {
    // A struct of strings cannot fail to serialize.
    serde_json::to_string(&EnvelopeRef { user }).unwrap_or_default()
}

/// Parse a raw credential into a user record.
///
/// Only `id` and `username` decide validity. The other fields are read on a
/// best-effort basis: wrongly typed values are ignored and `displayName` /
/// `role` win over their `nombre` / `rol` aliases.
///
/// # Errors
///
/// Returns [`DecodeError::Malformed`] if `raw` is not JSON, and
/// [`DecodeError::Incomplete`] if there is no user object or it lacks a
/// non-empty string `id` or `username`.
pub fn decode(raw: &str) -> Result<UserRecord, DecodeError> {
    let value: Value = serde_json::from_str(raw).map_err(DecodeError::Malformed)?;
    let user = value
        .get("user")
        .and_then(Value::as_object)
        .ok_or(DecodeError::Incomplete("missing user"))?;
    let text = |key: &str| user.get(key).and_then(Value::as_str).map(str::to_owned);

    validate_user(UserRecord {
        id: text("id").unwrap_or_default(),
        username: text("username").unwrap_or_default(),
        display_name: text("displayName").or_else(|| text("nombre")).unwrap_or_default(),
        role: text("role").or_else(|| text("rol")).unwrap_or_default(),
        email: text("email"),
    })
}

/// Check that a user record carries the fields every session needs.
///
/// # Errors
///
/// Returns [`DecodeError::Incomplete`] naming the first missing field.
pub fn validate_user(user: UserRecord) -> Result<UserRecord, DecodeError> {
    if user.is_complete() {
        Ok(user)
    } else if user.id.is_empty() {
        Err(DecodeError::Incomplete("missing user id"))
    } else {
        Err(DecodeError::Incomplete("missing username"))
    }
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
