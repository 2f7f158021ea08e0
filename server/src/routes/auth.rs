//! Auth routes: login, logout and "who am I".

use axum::extract::{FromRequestParts, State};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::CookieJar;
use metro_session::UserRecord;
use serde::Deserialize;
use serde_json::json;

use crate::services::session::{self, CredentialError};
use crate::state::AppState;

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated user extracted from the session cookie.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub user: UserRecord,
}

/// Rejection for [`AuthUser`]: 401 with a JSON reason, clearing any rejected credential.
pub struct AuthRejection {
    jar: CookieJar,
    error: CredentialError,
}

impl AuthRejection {
    fn message(&self) -> &'static str {
        match self.error {
            CredentialError::Absent => "no active session",
            CredentialError::Unreadable | CredentialError::Malformed(_) => "invalid session",
            CredentialError::Incomplete(_) => "invalid session structure",
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.message() }));
        if self.error.is_present() {
            (StatusCode::UNAUTHORIZED, session::clear_credential(self.jar), body).into_response()
        } else {
            (StatusCode::UNAUTHORIZED, body).into_response()
        }
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        match session::authenticate(&jar, &parts.headers) {
            Ok(user) => Ok(Self { user }),
            Err(error) => {
                error.log(parts.uri.path());
                Err(AuthRejection { jar, error })
            }
        }
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /api/auth/me`: return current user.
pub async fn me(auth: AuthUser) -> Json<serde_json::Value> {
    Json(json!({ "user": auth.user }))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

/// `POST /api/auth/login`: verify credentials and issue the session cookie.
pub async fn login(State(state): State<AppState>, jar: CookieJar, Json(body): Json<LoginRequest>) -> Response {
    if body.username.trim().is_empty() || body.password.is_empty() {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": "username and password are required" }))).into_response();
    }

    let Some(user) = state.users.authenticate(&body.username, &body.password) else {
        tracing::info!(username = %body.username.trim(), "login rejected");
        return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "invalid credentials" }))).into_response();
    };

    tracing::info!(user_id = %user.id, username = %user.username, "login succeeded");
    let jar = session::issue_credential(jar, &user, state.config.cookie_secure);
    (jar, Json(json!({ "message": "login successful", "user": user }))).into_response()
}

/// `POST /api/auth/logout`: clear the session cookie. Succeeds without a session.
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    (session::clear_credential(jar), Json(json!({ "message": "logged out" })))
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
