use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{NoteStore, StoreError};
use crate::models::{Note, NoteId};

/// Process-local store. Keeps notes in insertion order.
#[derive(Default)]
pub struct MemoryRepository {
    notes: RwLock<Vec<Note>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NoteStore for MemoryRepository {
    async fn list_notes(&self) -> Result<Vec<Note>, StoreError> {
        Ok(self.notes.read().await.clone())
    }

    async fn create_note(&self, content: String, important: bool) -> Result<Note, StoreError> {
        let now = Utc::now();
        let note = Note {
            id: NoteId::new(),
            content,
            important,
            created_at: now,
            updated_at: now,
        };

        self.notes.write().await.push(note.clone());

        Ok(note)
    }

    async fn get_note(&self, id: NoteId) -> Result<Option<Note>, StoreError> {
        Ok(self
            .notes
            .read()
            .await
            .iter()
            .find(|note| note.id == id)
            .cloned())
    }

    async fn update_note(
        &self,
        id: NoteId,
        content: String,
        important: Option<bool>,
    ) -> Result<Option<Note>, StoreError> {
        let mut notes = self.notes.write().await;
        let Some(note) = notes.iter_mut().find(|note| note.id == id) else {
            return Ok(None);
        };

        note.content = content;
        if let Some(important) = important {
            note.important = important;
        }
        note.updated_at = Utc::now();

        Ok(Some(note.clone()))
    }

    async fn delete_note(&self, id: NoteId) -> Result<bool, StoreError> {
        let mut notes = self.notes.write().await;
        let before = notes.len();
        notes.retain(|note| note.id != id);

        Ok(notes.len() != before)
    }
}
