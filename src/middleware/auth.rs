use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::{resolve_identity, AuthError};
use crate::database::User;
use crate::error::ApiError;
use crate::state::AppState;

/// Account of the caller, injected by [`jwt_auth_middleware`]
#[derive(Clone, Debug)]
pub struct AuthUser(pub User);

/// Validates the session token and resolves it to a stored user.
///
/// Missing, malformed, forged and expired tokens, as well as tokens whose
/// user no longer exists, all end the request with the same 401 response.
/// Store failures while resolving the user end it with a 500.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_headers(&headers).ok_or_else(|| {
        tracing::debug!("Request without usable Authorization header");
        ApiError::unauthorized()
    })?;

    let user = authenticate(&state, token).await.map_err(|e| {
        if matches!(e, AuthError::Expired | AuthError::InvalidSignature | AuthError::UnknownUser) {
            tracing::warn!("Rejected token: {}", e);
        }
        ApiError::from(e)
    })?;

    request.extensions_mut().insert(AuthUser(user));
    Ok(next.run(request).await)
}

async fn authenticate(state: &AppState, token: &str) -> Result<User, AuthError> {
    let claims = state.tokens.validate(token)?;
    resolve_identity(&claims, state.users.as_ref()).await
}

/// Raw token from the Authorization header; a `Bearer ` prefix is optional
fn extract_token_from_headers(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?.trim_start();
    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
    (!token.is_empty()).then_some(token)
}
