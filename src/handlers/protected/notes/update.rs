use axum::Json;

use crate::api::envelope::NoteWriteResponse;
use crate::database::{Mutation, User};
use crate::error::ApiError;
use crate::spellcheck::enrich;
use crate::state::AppState;

/// Replace title and content of an owned note. The speller is only consulted
/// once the write has succeeded.
pub async fn update_note(
    state: &AppState,
    owner: &User,
    note_id: i64,
    title: &str,
    content: &str,
) -> Result<Json<NoteWriteResponse>, ApiError> {
    match state.notes.update(note_id, owner.id, title, content).await? {
        Mutation::NotFound => Ok(Json(NoteWriteResponse::not_found())),
        Mutation::Applied => {
            let spelling =
                enrich(state.spellchecker.as_ref(), content, state.spellcheck_timeout()).await;
            Ok(Json(NoteWriteResponse::success(
                "Note has been updated successfully",
                note_id,
                spelling,
            )))
        }
    }
}
