//! # metro-client
//!
//! Leptos + WASM frontend for the metro operations console.
//!
//! This crate holds the client half of the login gate: the auth state
//! machine fed by `/api/auth/me`, the layout shell that decides between bare
//! pages, a loading placeholder and full chrome, and the thin pages behind it.
//! Route classification is shared with the server through `metro-session`.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::mount_to_body(app::App);
}
