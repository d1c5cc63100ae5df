//! Authentication middleware for axum.

use axum::{
    body::Body,
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{bearer_token, token_fingerprint, Claims, TokenVerifier};
use crate::error::AuthError;

/// Extract and verify the bearer credential carried by `headers`.
///
/// Never logs the token itself, only its fingerprint.
pub fn authenticate(verifier: &TokenVerifier, headers: &HeaderMap) -> Result<Claims, AuthError> {
    let token = bearer_token(headers).ok_or_else(|| {
        tracing::debug!(code = AuthError::MissingCredential.code(), "No bearer token on request");
        AuthError::MissingCredential
    })?;

    match verifier.verify(token) {
        Ok(claims) => {
            tracing::debug!(
                sub = claims.subject().unwrap_or("-"),
                exp = ?claims.expires_at(),
                "Bearer token admitted"
            );
            Ok(claims)
        }
        Err(e) => {
            tracing::debug!(
                code = e.code(),
                reason = ?std::error::Error::source(&e).map(|source| source.to_string()),
                token = %token_fingerprint(token),
                "Bearer token rejected"
            );
            Err(e)
        }
    }
}

/// Extract and validate JWT token from request.
///
/// Expects `Authorization: Bearer <token>` header. Verified claims are added
/// to request extensions for downstream handlers.
pub async fn require_bearer(
    State(verifier): State<TokenVerifier>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let claims = authenticate(&verifier, request.headers())?;

    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}
