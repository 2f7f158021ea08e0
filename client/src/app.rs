//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Style, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::layout::LayoutShell;
use crate::pages::{dashboard::DashboardPage, home::HomePage, login::LoginPage};
use crate::state::auth::AuthState;
use crate::util::auth::install_auth_check;

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

/// Console stylesheet, injected into `<head>` at mount.
pub const STYLESHEET: &str = include_str!("../style/main.css");

/// Root application component.
///
/// Provides the auth context, starts the one auth check for this mount, and
/// routes every page through the layout shell.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::Loading);
    provide_context(auth);
    install_auth_check(auth);

    view! {
        <Style id="metro-console">{STYLESHEET}</Style>
        <Title text="Metro Control"/>

        <Router>
            <LayoutShell>
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("dashboard") view=DashboardPage/>
                </Routes>
            </LayoutShell>
        </Router>
    }
}
