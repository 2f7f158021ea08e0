//! Session credential storage over the `metro-session` cookie.
//!
//! ARCHITECTURE
//! ============
//! The credential is the encoded user envelope itself; there is no server-side
//! session table. Reading, issuing and clearing all go through the cookie jar,
//! and validity is decided by `metro_session::decode`.
//!
//! TRADE-OFFS
//! ==========
//! Every failure class is logged separately for diagnosis but handled the same
//! way by callers: the request is treated as unauthenticated.

use axum::http::{HeaderMap, header};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use metro_session::{DecodeError, SESSION_COOKIE_NAME, UserRecord};
use time::Duration;

/// Why a request could not be associated with a user.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// No credential cookie, or an empty one.
    #[error("no session credential")]
    Absent,
    /// A credential cookie was sent but its value is not valid percent-encoded UTF-8.
    #[error("unreadable session credential")]
    Unreadable,
    /// The credential is not parseable.
    #[error("malformed session credential: {0}")]
    Malformed(serde_json::Error),
    /// The credential parsed but lacks required user fields.
    #[error("incomplete session credential: {0}")]
    Incomplete(&'static str),
}

impl From<DecodeError> for CredentialError {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::Malformed(e) => Self::Malformed(e),
            DecodeError::Incomplete(reason) => Self::Incomplete(reason),
        }
    }
}

impl CredentialError {
    /// `true` when a credential was sent but rejected, so it must be cleared.
    #[must_use]
    pub fn is_present(&self) -> bool {
        !matches!(self, Self::Absent)
    }

    /// Emit one diagnostic line per failure class.
    pub fn log(&self, path: &str) {
        match self {
            Self::Absent => tracing::debug!(%path, "no session credential"),
            Self::Unreadable => tracing::warn!(%path, "unreadable session credential"),
            Self::Malformed(e) => tracing::warn!(%path, error = %e, "malformed session credential"),
            Self::Incomplete(reason) => tracing::warn!(%path, %reason, "incomplete session credential"),
        }
    }
}

/// Raw credential value from the jar; empty values count as absent.
#[must_use]
pub fn read_credential(jar: &CookieJar) -> Option<&str> {
    jar.get(SESSION_COOKIE_NAME)
        .map(Cookie::value)
        .filter(|value| !value.trim().is_empty())
}

/// Whether the raw `Cookie` headers carry a non-empty credential pair.
///
/// The jar drops cookies it cannot percent-decode, so presence is judged
/// from the headers themselves.
#[must_use]
pub fn credential_sent(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.split_once('='))
        .any(|(name, value)| name.trim() == SESSION_COOKIE_NAME && !value.trim().is_empty())
}

/// Validate a raw credential.
///
/// # Errors
///
/// Returns [`CredentialError::Absent`] for `None`, otherwise the decode failure.
pub fn check_credential(raw: Option<&str>) -> Result<UserRecord, CredentialError> {
    let raw = raw.ok_or(CredentialError::Absent)?;
    Ok(metro_session::decode(raw)?)
}

/// Read and validate the credential carried by a request.
///
/// # Errors
///
/// See [`check_credential`]. A credential present in `headers` that the jar
/// could not decode is [`CredentialError::Unreadable`], not absent.
pub fn authenticate(jar: &CookieJar, headers: &HeaderMap) -> Result<UserRecord, CredentialError> {
    match read_credential(jar) {
        None if credential_sent(headers) => Err(CredentialError::Unreadable),
        raw => check_credential(raw),
    }
}

/// Attach a freshly encoded credential for `user`.
#[must_use]
pub fn issue_credential(jar: CookieJar, user: &UserRecord, secure: bool) -> CookieJar {
    let cookie = Cookie::build((SESSION_COOKIE_NAME, metro_session::encode(user)))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure);
    jar.add(cookie)
}

/// Expire the credential cookie on the client.
#[must_use]
pub fn clear_credential(jar: CookieJar) -> CookieJar {
    let cookie = Cookie::build((SESSION_COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::ZERO);
    jar.add(cookie)
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
