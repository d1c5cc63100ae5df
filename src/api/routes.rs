//! Route definitions for the API.

use axum::{middleware, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::handlers;
use crate::auth::require_bearer;
use crate::config::AuthMode;
use crate::AppState;

/// Security scheme modifier for OpenAPI.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::verify_token,
        handlers::current_user,
        handlers::health_check,
    ),
    components(schemas(
        crate::api::types::VerifyResponse,
        crate::api::types::HealthResponse,
        crate::error::RejectionResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Bearer token verification"),
        (name = "health", description = "Health and status endpoints")
    ),
    info(
        title = "Mentor Gate API",
        version = "0.1.0",
        description = "Bearer-token verification gate for the mentorship platform",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Build the API router for the configured auth mode.
///
/// In `endpoint` mode only the standalone verification route is mounted; in
/// `middleware` mode the protected routes sit behind `require_bearer`.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let auth_routes: Router = match state.mode {
        AuthMode::Endpoint => Router::new()
            .route(
                "/api/auth/verify",
                get(handlers::verify_token).post(handlers::verify_token),
            )
            .with_state(state.clone()),
        AuthMode::Middleware => Router::new()
            .route("/api/auth/me", get(handlers::current_user))
            .route_layer(middleware::from_fn_with_state(
                state.verifier.clone(),
                require_bearer,
            )),
    };

    // Public routes (no auth required)
    let public_routes: Router = Router::new()
        .route("/api/health", get(handlers::health_check))
        .with_state(state);

    Router::new()
        .merge(auth_routes)
        .merge(public_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
