use axum::Json;

use crate::api::envelope::ReadNoteResponse;
use crate::database::User;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn read_note(
    state: &AppState,
    owner: &User,
    note_id: i64,
) -> Result<Json<ReadNoteResponse>, ApiError> {
    let response = match state.notes.read(note_id, owner.id).await? {
        Some(note) => ReadNoteResponse::found(note),
        None => ReadNoteResponse::not_found(),
    };
    Ok(Json(response))
}
