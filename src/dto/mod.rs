use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Note, NoteDraft};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NoteResponse {
    /// Note ID
    #[schema(value_type = String, format = Uuid)]
    pub id: String,
    /// Note content
    pub content: String,
    /// Importance flag
    pub important: bool,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        Self {
            id: note.id.to_string(),
            content: note.content,
            important: note.important,
            created_at: note.created_at,
            updated_at: note.updated_at,
        }
    }
}

/// Body of both create and update requests. Every field is optional here so
/// that a missing `content` reaches validation instead of failing extraction.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct NotePayload {
    /// Note content, must not be empty
    pub content: Option<String>,
    /// Importance flag, defaults to false on create
    pub important: Option<bool>,
}

impl From<NotePayload> for NoteDraft {
    fn from(payload: NotePayload) -> Self {
        Self {
            content: payload.content,
            important: payload.important,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human readable error message
    pub error: String,
}
