//! Authentication ports.

use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

/// Claims stored in bearer tokens.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub user_id: Uuid,
    pub email: String,
    /// Unique id of this specific token; logout revokes exactly this id.
    pub jti: Uuid,
    pub exp: i64,
}

/// Token service trait for issuing and validating bearer tokens.
pub trait TokenService: Send + Sync {
    /// Generate an access token for a user.
    fn generate_token(&self, user_id: Uuid, email: &str) -> Result<String, AuthError>;

    /// Validate and decode a token.
    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Token lifetime, for revocation-entry expiry.
    fn expiration_seconds(&self) -> i64;
}

/// Store of revoked token ids.
///
/// Logout invalidates only the token used on the current request, not all
/// of the user's tokens, so revocation is keyed by `jti`. Entries may be
/// dropped once the token would have expired anyway.
#[async_trait]
pub trait TokenRevocationStore: Send + Sync {
    async fn revoke(&self, jti: Uuid, ttl: Duration);

    async fn is_revoked(&self, jti: Uuid) -> bool;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Token revoked")]
    TokenRevoked,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Hashing error: {0}")]
    HashingError(String),
}
