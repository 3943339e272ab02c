//! # Caller Authentication
//!
//! Credentials are verified by an [`IdentityVerifier`]; the shipped implementation,
//! [`JwtVerifier`], accepts HS256 tokens whose `userId` claim is the owner UUID.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::models::OwnerId;

/// Authentication errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("JWT processing error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuthHeader,

    #[error("Invalid authorization header format")]
    InvalidAuthFormat,
}

/// Identity attached to an authenticated request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub owner_id: OwnerId,
}

/// JWT claims carried by user tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    #[serde(rename = "userId")]
    pub user_id: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    #[serde(default)]
    pub iat: i64,
}

/// Verifies a credential and yields the caller's identity
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, credential: &str) -> Result<AuthenticatedUser, AuthError>;
}

/// HS256 token verifier
#[derive(Clone)]
pub struct JwtVerifier {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtVerifier")
            .field("leeway", &self.validation.leeway)
            .finish_non_exhaustive()
    }
}

impl JwtVerifier {
    pub fn new(secret: &str, leeway_seconds: u64) -> Result<Self, AuthError> {
        if secret.is_empty() {
            return Err(AuthError::ConfigurationError(
                "JWT secret not configured".to_string(),
            ));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway_seconds;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    /// Create verifier from configuration
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        Self::new(&config.jwt_secret, config.leeway_seconds)
    }

    /// Sign a token for `owner`, valid for `ttl`
    pub fn issue_token(&self, owner: OwnerId, ttl: Duration) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = UserClaims {
            user_id: owner.to_string(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        };
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?)
    }

    /// Decode and check a token, returning its claims
    pub fn validate_token(&self, token: &str) -> Result<UserClaims, AuthError> {
        let data = decode::<UserClaims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }
}

#[async_trait]
impl IdentityVerifier for JwtVerifier {
    async fn verify(&self, credential: &str) -> Result<AuthenticatedUser, AuthError> {
        let claims = self.validate_token(credential)?;
        let owner = Uuid::parse_str(&claims.user_id)
            .map_err(|_| AuthError::InvalidToken("userId claim is not a valid id".to_string()))?;

        debug!(owner_id = %owner, "Verified user token");
        Ok(AuthenticatedUser {
            owner_id: OwnerId(owner),
        })
    }
}

/// Pull the token out of an `Authorization` header value.
///
/// Accepts `Bearer <token>` as well as a bare token.
pub fn extract_token(header_value: &str) -> Result<&str, AuthError> {
    let trimmed = header_value.trim();
    let token = match trimmed.split_once(char::is_whitespace) {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        None if trimmed.eq_ignore_ascii_case("bearer") => "",
        _ => trimmed,
    };

    if token.is_empty() || token.contains(char::is_whitespace) {
        return Err(AuthError::InvalidAuthFormat);
    }
    Ok(token)
}
