// handlers/public/auth/login.rs - POST /v1/login handler

use axum::{body::Bytes, extract::State, Json};

use super::Credentials;
use crate::api::envelope::LoginResponse;
use crate::error::ApiError;
use crate::handlers::utils::{decode_json, run_blocking};
use crate::state::AppState;

/// POST /v1/login - Authenticate and receive a session token
///
/// Expected Output (Success):
/// ```json
/// { "status": "success", "message": "Login successful", "token": "eyJhbGciOiJIUzI1NiI..." }
/// ```
///
/// Unknown usernames and wrong passwords both answer 401 with the same body.
/// The token carries the username and expires after the configured lifetime
/// (24 hours by default).
pub async fn login_post(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<LoginResponse>, ApiError> {
    let credentials: Credentials = decode_json(&body)?;
    credentials.validate()?;

    let Some(user) = state.users.find_by_username(&credentials.username).await? else {
        tracing::warn!("Login attempt for unknown user '{}'", credentials.username);
        return Err(ApiError::unauthorized());
    };

    let hasher = state.passwords.clone();
    let stored_hash = user.password_hash.clone();
    let password = credentials.password;
    let matches = run_blocking(move || hasher.verify(&stored_hash, &password)).await??;

    if !matches {
        tracing::warn!("Wrong password for user '{}'", user.username);
        return Err(ApiError::unauthorized());
    }

    let token = state.tokens.issue(&user)?;
    tracing::info!("User '{}' logged in", user.username);
    Ok(Json(LoginResponse::new(token)))
}
