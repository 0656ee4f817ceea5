// handlers/protected/notes/mod.rs - the /v1/note resource and /v1/allnotes
//
// A single route serves all four note operations; the HTTP method picks the
// operation through `NoteAction`.

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::Method,
    response::{IntoResponse, Response},
    Extension,
};
use serde::Deserialize;

use crate::error::ApiError;
use crate::handlers::utils::decode_json;
use crate::middleware::AuthUser;
use crate::state::AppState;

pub mod create;
pub mod delete;
pub mod list;
pub mod read;
pub mod update;

pub use list::all_notes_get;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteAction {
    Create,
    Read,
    Update,
    Delete,
}

const NOTE_ACTIONS: [(Method, NoteAction); 4] = [
    (Method::POST, NoteAction::Create),
    (Method::GET, NoteAction::Read),
    (Method::PATCH, NoteAction::Update),
    (Method::DELETE, NoteAction::Delete),
];

impl NoteAction {
    pub fn from_method(method: &Method) -> Option<Self> {
        NOTE_ACTIONS
            .iter()
            .find(|(m, _)| m == method)
            .map(|(_, action)| *action)
    }
}

/// Body of a /v1/note request. Which fields are required depends on the action;
/// client-supplied owner or timestamp fields are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct NoteRequest {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NoteQuery {
    pub id: Option<String>,
}

impl NoteRequest {
    /// Empty bodies are allowed so GET and DELETE can pass the id as `?id=`.
    fn decode(body: &[u8], query: NoteQuery) -> Result<Self, ApiError> {
        let mut request = if body.iter().all(u8::is_ascii_whitespace) {
            NoteRequest::default()
        } else {
            decode_json::<NoteRequest>(body)?
        };

        if request.id.is_none() {
            if let Some(raw) = query.id {
                let id = raw
                    .trim()
                    .parse()
                    .map_err(|_| ApiError::bad_request("Note id must be an integer"))?;
                request.id = Some(id);
            }
        }
        Ok(request)
    }

    fn require_id(&self) -> Result<i64, ApiError> {
        self.id.ok_or_else(|| ApiError::bad_request("Missing field: id"))
    }

    fn require_text(self) -> Result<(String, String), ApiError> {
        match (self.title, self.content) {
            (Some(title), Some(content)) => Ok((title, content)),
            (None, _) => Err(ApiError::bad_request("Missing field: title")),
            (_, None) => Err(ApiError::bad_request("Missing field: content")),
        }
    }
}

/// POST|GET|PATCH|DELETE /v1/note
pub async fn note_action(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    method: Method,
    query: Result<Query<NoteQuery>, QueryRejection>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let action = NoteAction::from_method(&method)
        .ok_or_else(|| ApiError::method_not_allowed(format!("Unsupported method {}", method)))?;
    let Query(query) = query.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let request = NoteRequest::decode(&body, query)?;

    let response = match action {
        NoteAction::Create => {
            let (title, content) = request.require_text()?;
            create::create_note(&state, &user, &title, &content)
                .await?
                .into_response()
        }
        NoteAction::Read => {
            let id = request.require_id()?;
            read::read_note(&state, &user, id).await?.into_response()
        }
        NoteAction::Update => {
            let id = request.require_id()?;
            let (title, content) = request.require_text()?;
            update::update_note(&state, &user, id, &title, &content)
                .await?
                .into_response()
        }
        NoteAction::Delete => {
            let id = request.require_id()?;
            delete::delete_note(&state, &user, id).await?.into_response()
        }
    };

    Ok(response)
}
