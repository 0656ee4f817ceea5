// handlers/public/auth/mod.rs - Account creation and token acquisition
//
// POST /v1/register - create an account from {username, password}
// POST /v1/login    - exchange {username, password} for a session token

use serde::Deserialize;

use crate::error::ApiError;

pub mod login;
pub mod register;

pub use login::login_post;
pub use register::register_post;

/// Plaintext credentials as sent by the client; only ever hashed or verified.
#[derive(Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.username.trim().is_empty() || self.password.is_empty() {
            return Err(ApiError::bad_request("Username and password are required"));
        }
        Ok(())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
