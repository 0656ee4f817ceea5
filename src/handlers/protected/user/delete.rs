use axum::{extract::State, Extension, Json};

use crate::api::envelope::MessageResponse;
use crate::middleware::AuthUser;
use crate::state::AppState;

/// DELETE /v1/deleteuser - remove the caller's notes, then the caller
///
/// A store failure is logged and reported in the message; the response
/// itself still goes out as a normal envelope.
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
) -> Json<MessageResponse> {
    let message = match state.users.delete_cascade(user.id).await {
        Ok(_) => {
            tracing::info!("Deleted user '{}' (id {})", user.username, user.id);
            "User deleted successfully"
        }
        Err(e) => {
            tracing::error!("Failed to delete user '{}': {}", user.username, e);
            "Failed to delete user"
        }
    };

    Json(MessageResponse {
        message: message.to_string(),
    })
}
