//! API request and response types.

use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::Claims;

// ==================== Verification ====================

/// Successful verification: the caller's decoded claims.
#[derive(Debug, Serialize, ToSchema)]
pub struct VerifyResponse {
    /// Always `true`.
    pub valid: bool,
    /// Claims exactly as signed by the issuer.
    #[schema(value_type = Object)]
    pub user: Claims,
}

impl VerifyResponse {
    pub fn admitted(claims: Claims) -> Self {
        Self {
            valid: true,
            user: claims,
        }
    }
}

// ==================== Health ====================

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
    /// How the authenticator is mounted.
    pub auth_mode: String,
    /// Timestamp.
    pub timestamp: String,
}
