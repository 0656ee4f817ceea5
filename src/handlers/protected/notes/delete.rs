use axum::Json;

use crate::api::envelope::StatusResponse;
use crate::database::{Mutation, User};
use crate::error::ApiError;
use crate::state::AppState;

pub async fn delete_note(
    state: &AppState,
    owner: &User,
    note_id: i64,
) -> Result<Json<StatusResponse>, ApiError> {
    let response = match state.notes.delete(note_id, owner.id).await? {
        Mutation::Applied => StatusResponse::success("Note has been deleted successfully"),
        Mutation::NotFound => StatusResponse::not_found(),
    };
    Ok(Json(response))
}
