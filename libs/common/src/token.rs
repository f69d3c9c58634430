//! Bearer token signing and verification
//!
//! Tokens are HS256 JWTs whose `sub` claim is the numeric user id. The auth
//! service issues them; every service verifies them with the same secret.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Token configuration
#[derive(Clone)]
pub struct TokenConfig {
    /// Shared HMAC secret
    pub secret: String,
    /// Access token expiration time in seconds (default: 24 hours)
    pub access_token_expiry: u64,
}

impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"<redacted>")
            .field("access_token_expiry", &self.access_token_expiry)
            .finish()
    }
}

impl TokenConfig {
    /// Create a new TokenConfig from environment variables
    ///
    /// # Environment Variables
    /// - `JWT_SECRET`: HMAC secret (required, non-empty)
    /// - `JWT_ACCESS_TOKEN_EXPIRY`: Access token expiry in seconds (default: 86400)
    pub fn from_env() -> Result<Self, TokenError> {
        let secret = std::env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                TokenError::Configuration("JWT_SECRET environment variable not set".to_string())
            })?;

        let access_token_expiry = std::env::var("JWT_ACCESS_TOKEN_EXPIRY")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(86_400);

        Ok(Self {
            secret,
            access_token_expiry,
        })
    }
}

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: i64,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
}

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token configuration error: {0}")]
    Configuration(String),

    #[error("Failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    #[error("Invalid token: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    #[error("Token subject is not a valid user id")]
    InvalidSubject,
}

/// Issues and verifies access tokens
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_token_expiry: u64,
}

impl TokenService {
    pub fn new(config: &TokenConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            access_token_expiry: config.access_token_expiry,
        }
    }

    /// Generate an access token for a user
    pub fn issue(&self, user_id: i64) -> Result<String, TokenError> {
        let now = unix_now();
        let claims = Claims {
            sub: user_id,
            iat: now,
            exp: now + self.access_token_expiry,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(TokenError::Signing)
    }

    /// Validate a token and return the claims
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(TokenError::Invalid)?;

        if data.claims.sub <= 0 {
            return Err(TokenError::InvalidSubject);
        }

        Ok(data.claims)
    }

    /// Get the access token expiry time
    pub fn access_token_expiry(&self) -> u64 {
        self.access_token_expiry
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
