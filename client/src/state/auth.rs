//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Provided as `RwSignal<AuthState>` context by `App`. Only `util::auth`
//! writes it; the layout shell and pages read it to pick what to render and
//! where to redirect. The server gate performs its own check independently.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use metro_session::UserRecord;
use metro_session::routes::{self, RouteClass};

/// Result of the client-side "who am I" check.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AuthState {
    /// Check in flight; the initial state of every mount.
    #[default]
    Loading,
    /// `/api/auth/me` returned a well-formed user.
    Authenticated(UserRecord),
    /// Any failure: no session, rejected session, network error or timeout.
    Unauthenticated,
}

impl AuthState {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub fn user(&self) -> Option<&UserRecord> {
        match self {
            Self::Authenticated(user) => Some(user),
            Self::Loading | Self::Unauthenticated => None,
        }
    }
}

/// `true` when a protected page has finished loading without a user.
#[must_use]
pub fn should_redirect_unauth(path: &str, state: &AuthState) -> bool {
    routes::classify(path) == RouteClass::Protected && !state.is_loading() && state.user().is_none()
}
