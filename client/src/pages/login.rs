//! Login page: username + password form against `/api/auth/login`.
//!
//! On success the page does a full navigation to the landing route so the
//! app remounts and re-runs the auth check with the fresh cookie.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;

/// Trimmed credentials ready to submit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// Check the form before any request goes out.
///
/// # Errors
///
/// Returns the message to show when either field is blank.
pub fn validate_login_input(username: &str, password: &str) -> Result<LoginInput, &'static str> {
    let username = username.trim();
    if username.is_empty() && password.is_empty() {
        return Err("Enter your username and password.");
    }
    if username.is_empty() {
        return Err("Enter your username.");
    }
    if password.is_empty() {
        return Err("Enter your password.");
    }
    Ok(LoginInput { username: username.to_owned(), password: password.to_owned() })
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let input = match validate_login_input(&username.get(), &password.get()) {
            Ok(input) => input,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Signing in...".to_owned());

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            use crate::util::auth::{BrowserNavigator, Navigator};
            match crate::net::api::login(&input.username, &input.password).await {
                Ok(()) => BrowserNavigator.navigate(metro_session::routes::LANDING_PATH),
                Err(e) => {
                    info.set(format!("Sign-in failed: {e}"));
                    busy.set(false);
                }
            }
        });
        #[cfg(not(feature = "csr"))]
        {
            let _ = input;
            busy.set(false);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Metro Control"</h1>
                <p class="login-card__subtitle">"Operations console"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        autocomplete="username"
                        placeholder="Username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        autocomplete="current-password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Sign in"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
