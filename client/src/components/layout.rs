//! Layout shell: picks bare page, loading placeholder, or full chrome.
//!
//! SYSTEM CONTEXT
//! ==============
//! Wraps the router outlet in `App`. Root and login render bare because those
//! pages run their own redirects; protected pages only get chrome once the
//! auth check has produced a user.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use leptos_router::hooks::{use_location, use_navigate};
use metro_session::routes;

use crate::components::chrome::{Header, Sidebar};
use crate::state::auth::AuthState;
use crate::util::auth::install_unauth_redirect;

/// What the shell renders for a given path and auth state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShellView {
    /// Children only, no navigation chrome.
    Bare,
    /// Spinner with a status line; children are not rendered.
    Placeholder(&'static str),
    /// Sidebar + header around the children.
    Chrome,
}

pub const VERIFYING_MESSAGE: &str = "Verifying access...";
pub const REDIRECTING_MESSAGE: &str = "Redirecting to login...";

#[must_use]
pub fn shell_view(path: &str, auth: &AuthState) -> ShellView {
    if routes::classify(path).is_bare() {
        return ShellView::Bare;
    }
    match auth {
        AuthState::Loading => ShellView::Placeholder(VERIFYING_MESSAGE),
        AuthState::Unauthenticated => ShellView::Placeholder(REDIRECTING_MESSAGE),
        AuthState::Authenticated(_) => ShellView::Chrome,
    }
}

#[component]
pub fn LayoutShell(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let location = use_location();
    let pathname = location.pathname;

    install_unauth_redirect(auth, pathname, use_navigate());

    let view_kind = Memo::new(move |_| shell_view(&pathname.get(), &auth.get()));

    move || match view_kind.get() {
        ShellView::Bare => view! { <div class="shell shell--bare">{children()}</div> }.into_any(),
        ShellView::Placeholder(message) => view! {
            <div class="shell shell--loading">
                <div class="shell__spinner"></div>
                <p class="shell__message">{message}</p>
            </div>
        }
        .into_any(),
        ShellView::Chrome => view! {
            <div class="shell">
                <Sidebar/>
                <div class="shell__main">
                    <Header/>
                    <main class="shell__content">{children()}</main>
                </div>
            </div>
        }
        .into_any(),
    }
}
