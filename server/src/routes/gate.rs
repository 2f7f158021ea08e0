//! Request gate: session-aware routing for every page request.
//!
//! SYSTEM CONTEXT
//! ==============
//! Installed as the outermost middleware so it runs before any page handler.
//! API, asset and favicon paths pass straight through; API handlers do their
//! own authorization.
//!
//! DESIGN
//! ======
//! Each request is judged on its own from two inputs, the path class and the
//! credential check, through the [`decide`] table. Every credential that fails
//! validation is cleared on the way out so a poisoned cookie cannot bounce the
//! browser between `/` and `/login` forever.

use axum::extract::Request;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use metro_session::routes::{self, LANDING_PATH, LOGIN_PATH, RouteClass};

use crate::services::session;

/// Outcome of validating the request credential.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CredentialCheck {
    Absent,
    Valid,
    Invalid,
}

/// What the gate does with the request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateAction {
    /// Hand the request to the router.
    Continue,
    /// Temporary redirect to the given path.
    Redirect(&'static str),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GateDecision {
    pub action: GateAction,
    /// Expire the credential cookie on the response.
    pub clear_credential: bool,
}

impl GateDecision {
    const fn go(clear_credential: bool) -> Self {
        Self { action: GateAction::Continue, clear_credential }
    }

    const fn redirect(to: &'static str, clear_credential: bool) -> Self {
        Self { action: GateAction::Redirect(to), clear_credential }
    }
}

/// The routing decision table. Excluded paths always continue untouched.
#[must_use]
pub fn decide(class: RouteClass, check: CredentialCheck) -> GateDecision {
    use CredentialCheck::{Absent, Invalid, Valid};

    match (class, check) {
        (RouteClass::Excluded, _) => GateDecision::go(false),

        (RouteClass::Root, Absent) => GateDecision::redirect(LOGIN_PATH, false),
        (RouteClass::Root, Valid) => GateDecision::redirect(LANDING_PATH, false),
        (RouteClass::Root, Invalid) => GateDecision::redirect(LOGIN_PATH, true),

        (RouteClass::Public, Absent) => GateDecision::go(false),
        (RouteClass::Public, Valid) => GateDecision::redirect(LANDING_PATH, false),
        (RouteClass::Public, Invalid) => GateDecision::go(true),

        (RouteClass::Protected, Absent) => GateDecision::redirect(LOGIN_PATH, false),
        (RouteClass::Protected, Valid) => GateDecision::go(false),
        (RouteClass::Protected, Invalid) => GateDecision::redirect(LOGIN_PATH, true),
    }
}

/// Collapse a credential validation result into the three table inputs.
#[must_use]
pub fn check_request(jar: &CookieJar, headers: &HeaderMap, path: &str) -> CredentialCheck {
    match session::authenticate(jar, headers) {
        Ok(_) => CredentialCheck::Valid,
        Err(err) => {
            err.log(path);
            if err.is_present() { CredentialCheck::Invalid } else { CredentialCheck::Absent }
        }
    }
}

/// Axum middleware enforcing [`decide`] on every request.
pub async fn session_gate(jar: CookieJar, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let class = routes::classify(&path);
    if class == RouteClass::Excluded {
        return next.run(request).await;
    }

    let decision = decide(class, check_request(&jar, request.headers(), &path));
    let response = match decision.action {
        GateAction::Continue => next.run(request).await,
        GateAction::Redirect(to) => {
            tracing::debug!(%path, %to, ?class, "gate redirect");
            Redirect::temporary(to).into_response()
        }
    };

    if decision.clear_credential {
        (session::clear_credential(jar), response).into_response()
    } else {
        response
    }
}

#[cfg(test)]
#[path = "gate_test.rs"]
mod tests;
