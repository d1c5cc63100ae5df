//! HTTP request handlers.

use axum::{extract::State, http::HeaderMap, Extension, Json};

use crate::api::types::*;
use crate::auth::{authenticate, Claims};
use crate::error::AuthError;
use crate::AppState;

/// Verify the caller's bearer token and echo its claims.
///
/// GET|POST /api/auth/verify
#[utoipa::path(
    method(get, post),
    path = "/api/auth/verify",
    responses(
        (status = 200, description = "Token is valid", body = VerifyResponse),
        (status = 401, description = "Token missing or invalid", body = crate::error::RejectionResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
pub async fn verify_token(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<VerifyResponse>, AuthError> {
    let claims = authenticate(&state.verifier, &headers)?;

    Ok(Json(VerifyResponse::admitted(claims)))
}

/// Return the identity attached by the bearer middleware.
///
/// GET /api/auth/me
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user claims", body = VerifyResponse),
        (status = 401, description = "Token missing or invalid", body = crate::error::RejectionResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
pub async fn current_user(Extension(claims): Extension<Claims>) -> Json<VerifyResponse> {
    Json(VerifyResponse::admitted(claims))
}

/// Health check endpoint.
///
/// GET /api/health
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        auth_mode: state.mode.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
