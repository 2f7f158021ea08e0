//! REST API helpers for communicating with the server.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`.
//! Native builds (tests, tooling): stubs returning errors since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result` outputs instead of panics. The auth check collapses
//! every error into `AuthState::Unauthenticated`, so the variants only matter
//! for logging.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use metro_session::UserRecord;
use serde::Deserialize;

pub const ME_ENDPOINT: &str = "/api/auth/me";
pub const LOGIN_ENDPOINT: &str = "/api/auth/login";
pub const LOGOUT_ENDPOINT: &str = "/api/auth/logout";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(String),
    /// The server answered with a non-success status.
    #[error("server responded {0}")]
    Status(u16),
    /// The response body is not what the endpoint promises.
    #[error("unexpected response body: {0}")]
    Payload(String),
}

#[derive(Debug, Deserialize)]
struct MeResponse {
    user: UserRecord,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Parse a `/api/auth/me` success body into a complete user.
///
/// # Errors
///
/// Returns [`ApiError::Payload`] if the body is not `{"user": {...}}` or the
/// user lacks an id or username.
pub fn parse_me_response(body: &str) -> Result<UserRecord, ApiError> {
    let parsed: MeResponse = serde_json::from_str(body).map_err(|e| ApiError::Payload(e.to_string()))?;
    metro_session::validate_user(parsed.user).map_err(|e| ApiError::Payload(e.to_string()))
}

/// Human-readable reason from an error body, falling back to the status.
#[must_use]
pub fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .map(|e| e.error)
        .unwrap_or_else(|_| format!("request failed: {status}"))
}

/// Session endpoints the auth state machine depends on.
#[allow(async_fn_in_trait)]
pub trait AuthApi {
    /// `GET /api/auth/me`.
    async fn current_user(&self) -> Result<UserRecord, ApiError>;
    /// `POST /api/auth/logout`.
    async fn logout(&self) -> Result<(), ApiError>;
}

/// [`AuthApi`] over the browser `fetch` API; cookies ride along same-origin.
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpAuthApi;

impl AuthApi for HttpAuthApi {
    async fn current_user(&self) -> Result<UserRecord, ApiError> {
        #[cfg(feature = "csr")]
        {
            let resp = gloo_net::http::Request::get(ME_ENDPOINT)
                .send()
                .await
                .map_err(|e| ApiError::Transport(e.to_string()))?;
            if !resp.ok() {
                return Err(ApiError::Status(resp.status()));
            }
            let body = resp.text().await.map_err(|e| ApiError::Payload(e.to_string()))?;
            parse_me_response(&body)
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(ApiError::Transport("not available outside the browser".to_owned()))
        }
    }

    async fn logout(&self) -> Result<(), ApiError> {
        #[cfg(feature = "csr")]
        {
            let resp = gloo_net::http::Request::post(LOGOUT_ENDPOINT)
                .send()
                .await
                .map_err(|e| ApiError::Transport(e.to_string()))?;
            if !resp.ok() {
                return Err(ApiError::Status(resp.status()));
            }
            Ok(())
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(ApiError::Transport("not available outside the browser".to_owned()))
        }
    }
}

/// Submit credentials via `POST /api/auth/login`. The server sets the session
/// cookie on success.
///
/// # Errors
///
/// Returns an error string suitable for display if the login is rejected or
/// the request fails.
pub async fn login(username: &str, password: &str) -> Result<(), String> {
    #[cfg(feature = "csr")]
    {
        let payload = serde_json::json!({ "username": username, "password": password });
        let resp = gloo_net::http::Request::post(LOGIN_ENDPOINT)
            .json(&payload)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(error_message(status, &body));
        }
        Ok(())
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (username, password);
        Err("not available outside the browser".to_owned())
    }
}
