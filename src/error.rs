//! Error types for Mentor Gate.
//!
//! `AuthError` is the per-request rejection taxonomy and maps to a 401
//! response. `GateError` covers startup failures.

use axum::{
    http::{header::WWW_AUTHENTICATE, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Why a request was refused by the authenticator.
///
/// The `Display` text is exactly what callers see in `message`; validation
/// detail stays in the source error and is only logged.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No `Authorization` header, or not of the form `Bearer <token>`.
    #[error("No token provided")]
    MissingCredential,

    /// Token present but malformed, tampered, expired or otherwise rejected.
    #[error("Invalid token")]
    InvalidCredential(#[source] jsonwebtoken::errors::Error),
}

impl AuthError {
    /// Stable code for logs.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingCredential => "MISSING_CREDENTIAL",
            AuthError::InvalidCredential(_) => "INVALID_CREDENTIAL",
        }
    }
}

/// Body returned on authentication failure.
#[derive(Debug, Serialize, ToSchema)]
pub struct RejectionResponse {
    /// Always `false`.
    pub valid: bool,
    /// `No token provided` or `Invalid token`.
    pub message: String,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = RejectionResponse {
            valid: false,
            message: self.to_string(),
        };

        (
            StatusCode::UNAUTHORIZED,
            [(WWW_AUTHENTICATE, "Bearer")],
            Json(body),
        )
            .into_response()
    }
}

/// Startup errors. None of these are recoverable per request.
#[derive(Debug, Error)]
pub enum GateError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// Result type alias for startup operations.
pub type GateResult<T> = Result<T, GateError>;
