//! Authentication and authorization ports.

use serde::{Deserialize, Serialize};

use crate::domain::Role;

/// Identity claims carried by a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    pub id: String,
    pub name: String,
    pub role: Role,
}

/// Issues and decodes bearer tokens.
pub trait TokenManager: Send + Sync {
    /// Issue a token for the given identity.
    fn create_token(&self, payload: &TokenPayload) -> Result<String, AuthError>;

    /// Decode a token. `None` when it is malformed, tampered with, or expired.
    fn get_payload(&self, token: &str) -> Option<TokenPayload>;

    /// Lifetime of issued tokens.
    fn expiration_seconds(&self) -> i64;
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
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Hashing error: {0}")]
    HashingError(String),
}
