//! Dashboard page: the authenticated landing route.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;

use crate::state::auth::AuthState;

/// Greeting line for the signed-in user.
#[must_use]
pub fn greeting(auth: &AuthState) -> String {
    let Some(user) = auth.user() else {
        return String::new();
    };
    let name = if user.display_name.trim().is_empty() { &user.username } else { &user.display_name };
    if user.role.is_empty() {
        format!("Welcome, {name}")
    } else {
        format!("Welcome, {name} ({})", user.role)
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();

    view! {
        <section class="dashboard">
            <h1 class="dashboard__title">"Dashboard"</h1>
            <p class="dashboard__greeting">{move || greeting(&auth.get())}</p>
        </section>
    }
}
