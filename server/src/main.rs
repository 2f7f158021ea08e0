mod config;
mod routes;
mod services;
mod state;

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // `.env` is optional; real environment variables win.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = match config::ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let users = match services::auth::UserDirectory::load(config.users_file.as_deref()) {
        Ok(users) => users,
        Err(e) => {
            tracing::error!(error = %e, "user directory load failed");
            return ExitCode::FAILURE;
        }
    };
    if config.users_file.is_none() {
        tracing::warn!("METRO_USERS_FILE not set, using the built-in demo account");
    } else if users.is_empty() {
        tracing::warn!("user directory is empty; nobody can log in");
    }
    tracing::info!(accounts = users.len(), "user directory loaded");

    let bind = config.bind;
    let state = state::AppState::new(config, users);
    let app = routes::app(state);

    let listener = match tokio::net::TcpListener::bind(bind).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, %bind, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(%bind, "metro console listening");
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server failed");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
