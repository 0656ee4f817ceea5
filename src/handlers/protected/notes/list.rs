use axum::{extract::State, Extension, Json};

use crate::api::envelope::AllNotesResponse;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;

/// GET /v1/allnotes - every note of the caller; none at all is still a success
pub async fn all_notes_get(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
) -> Result<Json<AllNotesResponse>, ApiError> {
    let notes = state.notes.list_all(user.id).await?;
    Ok(Json(AllNotesResponse::new(notes)))
}
