use jsonwebtoken::Algorithm;

/// Validity window for issued access tokens.
const TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// Configuration for token signing and verification.
///
/// Constructed once at startup and injected by reference; both issuance and
/// verification read the same key, so all verifying instances of a deployment
/// must share it.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Secret key for signing and verifying tokens
    pub jwt_secret: Vec<u8>,
    /// Signing algorithm (HS256)
    pub algorithm: Algorithm,
    /// Seconds from issuance to expiry
    pub token_ttl_secs: i64,
}

impl SecurityConfig {
    /// Create a new SecurityConfig with the given secret and the default
    /// seven-day token lifetime.
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            token_ttl_secs: TOKEN_TTL_SECS,
        }
    }
}
