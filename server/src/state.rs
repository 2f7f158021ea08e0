//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers and the request gate via the
//! `State` extractor. Everything inside is immutable after startup, so the gate
//! never contends on shared data between concurrent requests.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::services::auth::UserDirectory;

/// Shared application state, injected into Axum handlers via State extractor.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub users: Arc<UserDirectory>,
}

impl AppState {
    #[must_use]
    pub fn new(config: ServerConfig, users: UserDirectory) -> Self {
        Self { config: Arc::new(config), users: Arc::new(users) }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use axum::body::Body;
    use axum::http::{Request, header};
    use metro_session::{SESSION_COOKIE_NAME, UserRecord};

    use super::*;

    /// `AppState` with default config and the demo directory.
    #[must_use]
    pub fn test_app_state() -> AppState {
        AppState::new(ServerConfig::default(), UserDirectory::demo())
    }

    /// The demo administrator as stored in a credential.
    #[must_use]
    pub fn admin_user() -> UserRecord {
        UserRecord {
            id: "1".into(),
            username: "admin".into(),
            display_name: "Administrador".into(),
            role: "admin".into(),
            email: None,
        }
    }

    /// `Cookie` header value carrying `raw` unencoded.
    #[must_use]
    pub fn session_cookie_header(raw: &str) -> String {
        format!("{SESSION_COOKIE_NAME}={raw}")
    }

    /// GET request, optionally carrying a raw credential.
    #[must_use]
    pub fn get(path: &str, credential: Option<&str>) -> Request<Body> {
        let mut builder = Request::get(path);
        if let Some(raw) = credential {
            builder = builder.header(header::COOKIE, session_cookie_header(raw));
        }
        builder.body(Body::empty()).expect("valid request")
    }
}
