use crate::{
    dto::{NotePayload, NoteResponse},
    models::{NoteDraft, NoteId, ValidationError, validate},
    repository::{NoteStore, StoreError},
};

use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("malformatted id: {0}")]
    MalformedId(String),

    #[error("note {0} not found")]
    NotFound(NoteId),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Clone)]
pub struct NoteService {
    repo: Arc<dyn NoteStore>,
}

fn parse_id(raw: &str) -> Result<NoteId, ServiceError> {
    raw.parse()
        .map_err(|_| ServiceError::MalformedId(raw.to_string()))
}

impl NoteService {
    pub const fn new(repo: Arc<dyn NoteStore>) -> Self {
        Self { repo }
    }

    pub async fn create_note(&self, request: NotePayload) -> Result<NoteResponse, ServiceError> {
        let note = validate(NoteDraft::from(request))?;

        let created = self
            .repo
            .create_note(note.content, note.important.unwrap_or(false))
            .await?;

        Ok(created.into())
    }

    /// `request` is `None` when the client sent no usable body.
    pub async fn update_note(
        &self,
        id: &str,
        request: Option<NotePayload>,
    ) -> Result<NoteResponse, ServiceError> {
        let id = parse_id(id)?;
        let note = validate(request.ok_or(ValidationError::MissingBody)?.into())?;

        self.repo
            .update_note(id, note.content, note.important)
            .await?
            .map(Into::into)
            .ok_or(ServiceError::NotFound(id))
    }

    /// Succeeds for any well-formed id, whether or not a note was removed.
    pub async fn delete_note(&self, id: &str) -> Result<(), ServiceError> {
        let id = parse_id(id)?;

        if !self.repo.delete_note(id).await? {
            tracing::debug!("delete of absent note {}", id);
        }

        Ok(())
    }

    pub async fn get_one_note(&self, id: &str) -> Result<NoteResponse, ServiceError> {
        let id = parse_id(id)?;

        self.repo
            .get_note(id)
            .await?
            .map(Into::into)
            .ok_or(ServiceError::NotFound(id))
    }

    pub async fn get_all_notes(&self) -> Result<Vec<NoteResponse>, ServiceError> {
        Ok(self
            .repo
            .list_notes()
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }
}
