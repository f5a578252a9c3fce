use chrono::{DateTime, Utc};
use uuid::Uuid;

use std::{fmt, str::FromStr};

/// Store-assigned note identifier.
///
/// Rendered as a hyphenated lowercase UUID. Anything that does not parse as a
/// UUID is a malformed id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoteId(Uuid);

impl NoteId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for NoteId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl FromStr for NoteId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: NoteId,
    pub content: String,
    pub important: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client-supplied fields of a note before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub content: Option<String>,
    pub important: Option<bool>,
}

/// A draft that passed [`validate`]. `content` is guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidNote {
    pub content: String,
    pub important: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("content missing")]
    MissingContent,

    #[error("content must not be empty")]
    EmptyContent,

    #[error("request body missing or not valid JSON")]
    MissingBody,
}

/// Shared by the create and update paths.
pub fn validate(candidate: NoteDraft) -> Result<ValidNote, ValidationError> {
    let content = candidate.content.ok_or(ValidationError::MissingContent)?;
    if content.is_empty() {
        return Err(ValidationError::EmptyContent);
    }

    Ok(ValidNote {
        content,
        important: candidate.important,
    })
}
