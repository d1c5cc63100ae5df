//! Mentor Gate - bearer-token verification for the mentorship platform.
//!
//! Verifies JWTs issued by the platform's auth service, either as a
//! standalone verification endpoint or as middleware in front of protected
//! routes.

use tokio::net::TcpListener;

mod api;
mod auth;
mod config;
mod error;
mod logging;

use crate::api::build_router;
use crate::auth::TokenVerifier;
use crate::config::{AuthMode, Config};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Verifier holding the shared secret.
    pub verifier: TokenVerifier,
    /// How the authenticator is exposed.
    pub mode: AuthMode,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if present)
    // This is optional and won't fail if .env doesn't exist
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Note: No .env file loaded ({e})");
    }

    // Initialize logging
    logging::init();

    tracing::info!("Starting Mentor Gate v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration; a missing secret stops startup here
    let config = Config::load().map_err(|e| {
        tracing::error!(error = %e, "Failed to load configuration");
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    tracing::info!(
        host = %config.server.host,
        port = %config.server.port,
        auth_mode = %config.auth.mode,
        issuer = ?config.auth.issuer,
        audience = ?config.auth.audience,
        "Configuration loaded"
    );

    let verifier = TokenVerifier::from_config(&config.auth)?;

    let state = AppState {
        verifier,
        mode: config.auth.mode,
    };

    // Build router
    let app = build_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!(address = %addr, "Server listening");
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
