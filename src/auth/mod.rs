pub mod password;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SecurityConfig;
use crate::database::{CredentialStore, DatabaseError, User};

pub use password::{PasswordError, PasswordHasher};

/// Self-contained session claims; nothing about a token is stored server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(username: impl Into<String>, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            username: username.into(),
            exp: (issued_at + ttl).timestamp(),
            iat: issued_at.timestamp(),
        }
    }
}

/// Authentication failures. The token variants are told apart for logging
/// only; they all render as the same unauthorized response.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token is malformed")]
    Malformed,

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    #[error("token refers to an unknown user")]
    UnknownUser,

    #[error("failed to sign token: {0}")]
    Signing(String),

    #[error(transparent)]
    Store(#[from] DatabaseError),
}

/// Issues and validates HS256 session tokens with a key fixed at startup.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(config: &SecurityConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();
        // Expiry is exact: a token is rejected from the second its `exp` passes.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl: Duration::hours(config.jwt_expiry_hours as i64),
        }
    }

    /// Token for `user`, valid for the configured lifetime from now.
    pub fn issue(&self, user: &User) -> Result<String, AuthError> {
        self.sign(&Claims::new(user.username.clone(), Utc::now(), self.ttl))
    }

    pub fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Verify signature and expiry and return the embedded claims.
    pub fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                _ => AuthError::Malformed,
            })
    }
}

/// Look up the account named by validated claims.
///
/// A token that outlives its account resolves to [`AuthError::UnknownUser`].
pub async fn resolve_identity(
    claims: &Claims,
    users: &dyn CredentialStore,
) -> Result<User, AuthError> {
    users
        .find_by_username(&claims.username)
        .await?
        .ok_or(AuthError::UnknownUser)
}
