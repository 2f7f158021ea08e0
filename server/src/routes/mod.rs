//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! API routes live under `/api`, the built client under `/pkg`, static images
//! under `/assets`. Every other path is a page and gets the client bootstrap
//! document. The session gate wraps the whole router and decides, before any
//! handler runs, whether a page request proceeds or is redirected.

pub mod auth;
pub mod gate;
pub mod pages;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum::routing::{get, post};
use axum::{Router, middleware};
use serde_json::json;
use tower_http::compression::CompressionLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// JSON API nested under `/api`. Not intercepted by the gate.
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/me", get(auth::me))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/healthz", get(healthz))
        .fallback(api_not_found)
}

/// Full application router.
pub fn app(state: AppState) -> Router {
    let site_root = state.config.site_root.clone();

    Router::new()
        .nest("/api", api_routes())
        .nest_service("/pkg", ServeDir::new(site_root.join("pkg")))
        .nest_service("/assets", ServeDir::new(site_root.join("assets")))
        .route_service("/favicon.ico", ServeFile::new(site_root.join("favicon.ico")))
        .fallback(pages::page_shell)
        .layer(middleware::from_fn(gate::session_gate))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

async fn api_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" })))
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
