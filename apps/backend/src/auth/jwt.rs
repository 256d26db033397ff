use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::AppError;
use crate::state::security_config::SecurityConfig;

/// Claims included in our backend-issued access tokens.
///
/// `username` is the name at issuance time; it is never re-validated against
/// current state. A claim is valid strictly before `exp`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Numeric user identifier (users.id)
    pub sub: i64,
    pub username: String,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

/// Why a token failed verification. Internal taxonomy only: the auth gate
/// collapses all three to one external 401 so a rejected caller cannot tell
/// which check failed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,
    #[error("bad signature")]
    BadSignature,
    #[error("token expired")]
    Expired,
}

/// Mint a signed HS256 access token for the given user.
///
/// `exp = now + token_ttl`; two mints at different instants yield distinct
/// tokens that are each valid until their own expiry.
pub fn mint_access_token(
    user_id: i64,
    username: &str,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("failed to get current time".to_string()))?
        .as_secs() as i64;

    let claims = Claims {
        sub: user_id,
        username: username.to_string(),
        iat,
        exp: iat + security.token_ttl_secs,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("failed to encode token: {e}")))
}

/// Verify a token and return its claims.
///
/// Checks run in order: structure, signature, expiry. Verification is a pure
/// computation over the token bytes and the secret key; it never touches
/// storage and never re-checks that the subject still exists.
pub fn verify_access_token(token: &str, security: &SecurityConfig) -> Result<Claims, TokenError> {
    let validation = Validation::new(security.algorithm);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::BadSignature,
        _ => TokenError::Malformed,
    })
}
