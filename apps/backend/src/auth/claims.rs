//! Authenticated identity inserted into request extensions by the auth gate.

use serde::{Deserialize, Serialize};

/// Verified identity for the in-flight request. Created once per admitted
/// request, read by downstream handlers, dropped when the request completes.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AuthClaims {
    /// Numeric user identifier (users.id)
    pub user_id: i64,
    /// Username at token-issuance time
    pub username: String,
}
