use axum::Json;

use crate::api::envelope::NoteWriteResponse;
use crate::database::User;
use crate::error::ApiError;
use crate::spellcheck::enrich;
use crate::state::AppState;

/// Store the note, then attach spelling suggestions for its content.
/// A failing speller only changes the `spelling` field.
pub async fn create_note(
    state: &AppState,
    owner: &User,
    title: &str,
    content: &str,
) -> Result<Json<NoteWriteResponse>, ApiError> {
    let note_id = state.notes.create(owner.id, title, content).await?;
    tracing::debug!("User {} created note {}", owner.id, note_id);

    let spelling = enrich(state.spellchecker.as_ref(), content, state.spellcheck_timeout()).await;

    Ok(Json(NoteWriteResponse::success(
        "Note has been created successfully",
        note_id,
        spelling,
    )))
}
