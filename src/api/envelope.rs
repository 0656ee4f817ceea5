//! Response bodies. Every note and account response carries a `status` and a
//! `message`; a missing or foreign note is reported inside the same envelope
//! with `status: "error"` instead of through the HTTP status code.

use serde::Serialize;

use crate::database::Note;
use crate::spellcheck::{SpellcheckSuggestion, SpellingStatus};

pub const NOTE_NOT_FOUND: &str = "No matching notes found";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// `{status, message}`: registration and note deletion.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: Status,
    pub message: String,
}

impl StatusResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: Status::Success,
            message: message.into(),
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: Status::Error,
            message: NOTE_NOT_FOUND.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub status: Status,
    pub message: String,
    pub token: String,
}

impl LoginResponse {
    pub fn new(token: String) -> Self {
        Self {
            status: Status::Success,
            message: "Login successful".to_string(),
            token,
        }
    }
}

/// `{message}`: account deletion.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Result of a note create or update, with the spelling outcome folded in.
#[derive(Debug, Serialize)]
pub struct NoteWriteResponse {
    pub status: Status,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spelling: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spelling_suggestion: Option<Vec<SpellcheckSuggestion>>,
}

impl NoteWriteResponse {
    pub fn success(message: impl Into<String>, note_id: i64, spelling: SpellingStatus) -> Self {
        Self {
            status: Status::Success,
            message: message.into(),
            note_id: Some(note_id.to_string()),
            spelling: Some(spelling.label().to_string()),
            spelling_suggestion: spelling.into_suggestions(),
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: Status::Error,
            message: NOTE_NOT_FOUND.to_string(),
            note_id: None,
            spelling: None,
            spelling_suggestion: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReadNoteResponse {
    pub status: Status,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Note>,
}

impl ReadNoteResponse {
    pub fn found(note: Note) -> Self {
        Self {
            status: Status::Success,
            message: "Note has been read successfully".to_string(),
            note: Some(note),
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: Status::Error,
            message: NOTE_NOT_FOUND.to_string(),
            note: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AllNotesResponse {
    pub status: Status,
    pub message: String,
    pub notes: Vec<Note>,
}

impl AllNotesResponse {
    /// An empty list is still a success, just with a different message.
    pub fn new(notes: Vec<Note>) -> Self {
        let message = if notes.is_empty() {
            "No notes found"
        } else {
            "All notes retrieved successfully"
        };
        Self {
            status: Status::Success,
            message: message.to_string(),
            notes,
        }
    }
}
