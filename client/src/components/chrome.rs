//! Navigation chrome around protected pages: sidebar links and the header
//! with the signed-in user and logout.

#[cfg(test)]
#[path = "chrome_test.rs"]
mod chrome_test;

use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::state::auth::AuthState;
use crate::util::auth::start_logout;

/// Sidebar entries as `(href, label)`.
pub const NAV_LINKS: &[(&str, &str)] = &[
    ("/dashboard", "Dashboard"),
    ("/lines", "Lines"),
    ("/routes", "Routes"),
    ("/trains", "Trains"),
    ("/alerts", "Alerts"),
    ("/control", "Control"),
];

/// Whether `href` is the current section. Sub-paths keep their parent lit.
#[must_use]
pub fn is_active(href: &str, pathname: &str) -> bool {
    let path = pathname.strip_suffix('/').filter(|p| !p.is_empty()).unwrap_or(pathname);
    path == href || path.strip_prefix(href).is_some_and(|rest| rest.starts_with('/'))
}

/// Header label for the signed-in user, falling back to the username.
#[must_use]
pub fn user_label(auth: &AuthState) -> String {
    match auth.user() {
        Some(user) if !user.display_name.trim().is_empty() => user.display_name.clone(),
        Some(user) => user.username.clone(),
        None => String::new(),
    }
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let pathname = use_location().pathname;

    view! {
        <nav class="sidebar">
            <div class="sidebar__brand">"Metro Control"</div>
            <ul class="sidebar__links">
                {NAV_LINKS
                    .iter()
                    .map(|&(href, label)| {
                        view! {
                            <li>
                                <a
                                    href=href
                                    class="sidebar__link"
                                    class:sidebar__link--active=move || is_active(href, &pathname.get())
                                >
                                    {label}
                                </a>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </nav>
    }
}

#[component]
pub fn Header() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let busy = RwSignal::new(false);

    let on_logout = move |_| {
        if busy.get() {
            return;
        }
        busy.set(true);
        start_logout(auth);
    };

    view! {
        <header class="header">
            <span class="header__user">{move || user_label(&auth.get())}</span>
            <button class="header__logout" on:click=on_logout disabled=move || busy.get()>
                "Log out"
            </button>
        </header>
    }
}
