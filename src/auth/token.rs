//! Bearer token issuance and verification.
//!
//! Tokens are HMAC-signed JWTs carrying the user id, email and role id.
//! Verification accepts only the HMAC algorithm family, so a token whose
//! header names an asymmetric algorithm or `none` is rejected before its
//! signature is looked at.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::db::{RoleId, User};
use crate::error::{AppError, AppResult};

/// Claims carried by an issued token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub email: String,
    pub role_id: RoleId,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Authenticated principal attached to a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i64,
    pub role_id: RoleId,
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            role_id: claims.role_id,
        }
    }
}

/// Signs and verifies tokens with one shared secret
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    /// Mint a token for the given user, valid for the configured ttl
    pub fn issue(&self, user: &User) -> AppResult<String> {
        let claims = Claims {
            user_id: user.id,
            email: user.email.clone(),
            role_id: user.role_id,
            exp: (Utc::now() + self.ttl).timestamp(),
        };
        self.sign(&claims)
    }

    fn sign(&self, claims: &Claims) -> AppResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| AppError::internal(format!("Failed to sign token: {}", e)))
    }

    /// Check signature, algorithm family and expiry, returning the identity
    pub fn verify(&self, token: &str) -> AppResult<Identity> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| Identity::from(data.claims))
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected bearer token");
                AppError::unauthenticated("Unauthorized")
            })
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value
pub fn parse_bearer(header: Option<&str>) -> AppResult<&str> {
    let header = header
        .filter(|h| !h.is_empty())
        .ok_or_else(|| AppError::unauthenticated("Unauthorized"))?;

    match header.strip_prefix("Bearer ") {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(AppError::unauthenticated("Unauthorized")),
    }
}
