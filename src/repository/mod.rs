mod embedded;
mod memory;
mod postgres;

pub use memory::MemoryRepository;
pub use postgres::PgRepository;

use async_trait::async_trait;

use crate::models::{Note, NoteId};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] tokio_postgres::Error),

    #[error("migration error: {0}")]
    Migration(#[from] refinery::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence backend for notes.
///
/// Implementations take `&self` everywhere; any synchronisation is their own
/// business.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Every stored note, oldest first.
    async fn list_notes(&self) -> Result<Vec<Note>, StoreError>;

    async fn create_note(&self, content: String, important: bool) -> Result<Note, StoreError>;

    async fn get_note(&self, id: NoteId) -> Result<Option<Note>, StoreError>;

    /// Replaces `content`, and `important` when given. `None` if no note has `id`.
    async fn update_note(
        &self,
        id: NoteId,
        content: String,
        important: Option<bool>,
    ) -> Result<Option<Note>, StoreError>;

    /// Returns whether a note was actually removed.
    async fn delete_note(&self, id: NoteId) -> Result<bool, StoreError>;
}
