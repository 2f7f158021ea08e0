//! Root route: waits for the auth check, then replaces itself with the
//! landing page or the login page.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use metro_session::routes::{LANDING_PATH, LOGIN_PATH};

use crate::state::auth::AuthState;

/// Where `/` should send the visitor, or `None` while the check is pending.
#[must_use]
pub fn home_target(auth: &AuthState) -> Option<&'static str> {
    match auth {
        AuthState::Loading => None,
        AuthState::Authenticated(_) => Some(LANDING_PATH),
        AuthState::Unauthenticated => Some(LOGIN_PATH),
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();

    Effect::new(move || {
        if let Some(target) = home_target(&auth.get()) {
            navigate(target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    view! {
        <div class="home-page">
            <div class="shell__spinner"></div>
            <p class="shell__message">"Verifying authentication..."</p>
        </div>
    }
}
