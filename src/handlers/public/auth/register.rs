// handlers/public/auth/register.rs - POST /v1/register handler

use axum::{body::Bytes, extract::State, Json};

use super::Credentials;
use crate::api::envelope::StatusResponse;
use crate::database::NewUser;
use crate::error::ApiError;
use crate::handlers::utils::{decode_json, run_blocking};
use crate::state::AppState;

/// POST /v1/register - Create a new account
///
/// Expected Input:
/// ```json
/// { "username": "alice", "password": "p@ss" }
/// ```
///
/// Expected Output (Success):
/// ```json
/// { "status": "success", "message": "User registered successfully" }
/// ```
///
/// A taken username answers 409 Conflict whatever the password.
pub async fn register_post(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<StatusResponse>, ApiError> {
    let credentials: Credentials = decode_json(&body)?;
    credentials.validate()?;

    if state
        .users
        .find_by_username(&credentials.username)
        .await?
        .is_some()
    {
        return Err(ApiError::conflict("Username already exists"));
    }

    let hasher = state.passwords.clone();
    let Credentials { username, password } = credentials;
    let password_hash = run_blocking(move || hasher.hash(&password)).await??;

    // A concurrent registration of the same name surfaces here as a unique violation → 409
    let user = state
        .users
        .save(NewUser {
            username,
            password_hash,
        })
        .await?;

    tracing::info!("Registered user '{}' (id {})", user.username, user.id);
    Ok(Json(StatusResponse::success("User registered successfully")))
}
