//! Client auth state machine: the one-shot "who am I" check, logout, and the
//! unauthenticated redirect shared by every protected route.
//!
//! SYSTEM CONTEXT
//! ==============
//! This mirrors the server gate without sharing state with it. The server
//! decides per request from the cookie; this module decides once per mount
//! from `/api/auth/me` and keeps the answer in `RwSignal<AuthState>`.
//!
//! FAILURE POLICY
//! ==============
//! Transport errors, non-success statuses, malformed payloads and timeouts all
//! land in `Unauthenticated`; nothing is retried and the state never stays
//! `Loading` once the check settles.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::future::Future;
use std::pin::pin;
use std::time::Duration;

use futures::future::{Either, select};
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use metro_session::routes::LOGIN_PATH;

use crate::net::api::AuthApi;
use crate::state::auth::{AuthState, should_redirect_unauth};

/// Upper bound on the `/api/auth/me` round-trip.
pub const AUTH_CHECK_TIMEOUT: Duration = Duration::from_secs(8);
/// Upper bound on waiting for the logout call before leaving anyway.
pub const LOGOUT_TIMEOUT: Duration = Duration::from_secs(5);

/// Full-page navigation, as opposed to a router transition.
pub trait Navigator {
    fn navigate(&self, path: &str);
}

/// Navigates by assigning `window.location`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn navigate(&self, path: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_href(path);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = path;
        }
    }
}

/// Run one auth check, racing it against `timeout`.
pub async fn resolve_auth<A, T>(api: &A, timeout: T) -> AuthState
where
    A: AuthApi,
    T: Future<Output = ()>,
{
    let check = pin!(api.current_user());
    let timeout = pin!(timeout);
    match select(check, timeout).await {
        Either::Left((Ok(user), _)) => {
            log::debug!("auth check succeeded for {}", user.username);
            AuthState::Authenticated(user)
        }
        Either::Left((Err(e), _)) => {
            log::info!("auth check failed: {e}");
            AuthState::Unauthenticated
        }
        Either::Right(((), _)) => {
            log::warn!("auth check timed out");
            AuthState::Unauthenticated
        }
    }
}

/// Log out: call the server, then always drop local auth and leave for `/login`.
pub async fn logout<A, N, T, F>(api: &A, navigator: &N, timeout: T, set_state: F)
where
    A: AuthApi,
    N: Navigator,
    T: Future<Output = ()>,
    F: FnOnce(AuthState),
{
    let call = pin!(api.logout());
    let timeout = pin!(timeout);
    match select(call, timeout).await {
        Either::Left((Ok(()), _)) => {}
        Either::Left((Err(e), _)) => log::warn!("logout request failed: {e}"),
        Either::Right(((), _)) => log::warn!("logout request timed out"),
    }
    set_state(AuthState::Unauthenticated);
    navigator.navigate(LOGIN_PATH);
}

/// Start the single auth check for this mount.
pub fn install_auth_check(auth: RwSignal<AuthState>) {
    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        let timeout = gloo_timers::future::sleep(AUTH_CHECK_TIMEOUT);
        let next = resolve_auth(&crate::net::api::HttpAuthApi, timeout).await;
        auth.set(next);
    });
    #[cfg(not(feature = "csr"))]
    {
        let _ = auth;
    }
}

/// Logout handler for the header button.
pub fn start_logout(auth: RwSignal<AuthState>) {
    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        let timeout = gloo_timers::future::sleep(LOGOUT_TIMEOUT);
        logout(&crate::net::api::HttpAuthApi, &BrowserNavigator, timeout, move |next| auth.set(next)).await;
    });
    #[cfg(not(feature = "csr"))]
    auth.set(AuthState::Unauthenticated);
}

/// `true` only on the transition into the redirect condition.
#[must_use]
pub fn redirect_edge(previous: Option<bool>, now: bool) -> bool {
    now && previous != Some(true)
}

/// One run of the unauth redirect: navigate to `/login` on the rising edge of
/// the redirect condition and return the condition for the next run.
pub fn unauth_redirect_step<F>(was_redirecting: Option<bool>, path: &str, auth: &AuthState, navigate: &F) -> bool
where
    F: Fn(&str, NavigateOptions),
{
    let redirecting = should_redirect_unauth(path, auth);
    if redirect_edge(was_redirecting, redirecting) {
        navigate(LOGIN_PATH, NavigateOptions { replace: true, ..NavigateOptions::default() });
    }
    redirecting
}

/// Redirect to `/login` when a protected page settles without a user.
///
/// Fires once per transition into that condition, not on every re-run.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, pathname: Memo<String>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move |was_redirecting: Option<bool>| {
        unauth_redirect_step(was_redirecting, &pathname.get(), &auth.get(), &navigate)
    });
}
