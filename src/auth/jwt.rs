//! JWT verification for bearer credentials.

use jsonwebtoken::{decode, Algorithm, DecodingKey, TokenData, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::AuthConfig;
use crate::error::{AuthError, GateResult};

/// Verified token payload.
///
/// Kept as the raw JSON object so handlers see exactly what the issuer signed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(Map<String, Value>);

impl Claims {
    /// Subject (user ID), if the issuer set one.
    pub fn subject(&self) -> Option<&str> {
        self.0.get("sub").and_then(Value::as_str)
    }

    /// Expiration time (Unix timestamp), if present.
    pub fn expires_at(&self) -> Option<i64> {
        self.0.get("exp").and_then(Value::as_i64)
    }
}

/// Verifies HMAC-signed JWTs against the shared secret.
///
/// Immutable after construction; clone freely across requests.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    /// Create a verifier with default validation: HMAC algorithms, `exp` and
    /// `nbf` checked when present, no leeway, no issuer or audience pinning.
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Self::base_validation(),
        }
    }

    /// Build a verifier from auth configuration.
    ///
    /// Fails if no usable secret is configured.
    pub fn from_config(config: &AuthConfig) -> GateResult<Self> {
        let secret = config.secret()?;
        let mut verifier = Self::new(secret.expose());
        let validation = &mut verifier.validation;

        validation.leeway = config.leeway_secs;
        if config.require_exp {
            validation.set_required_spec_claims(&["exp"]);
        }
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
        }
        if let Some(audience) = &config.audience {
            validation.validate_aud = true;
            validation.set_audience(&[audience]);
        }

        Ok(verifier)
    }

    fn base_validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.required_spec_claims.clear();
        validation.validate_nbf = true;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation
    }

    /// Validate and decode a JWT token.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let token_data: TokenData<Claims> = decode(token, &self.decoding_key, &self.validation)
            .map_err(AuthError::InvalidCredential)?;

        Ok(token_data.claims)
    }
}
