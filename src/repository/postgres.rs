use async_trait::async_trait;
use tokio_postgres::{Client, NoTls, Row};
use uuid::Uuid;

use super::{NoteStore, StoreError, embedded::migrations};
use crate::models::{Note, NoteId};

const NOTE_COLUMNS: &str = "id, content, important, created_at, updated_at";

pub struct PgRepository {
    client: Client,
}

impl PgRepository {
    pub async fn new(database_dsn: &str) -> Result<Self, StoreError> {
        let (client, con) = tokio_postgres::connect(database_dsn, NoTls).await?;

        tokio::spawn(async move {
            if let Err(e) = con.await {
                tracing::error!("connection error: {}", e);
            }
        });

        Ok(Self { client })
    }

    pub async fn migrate(&mut self) -> Result<(), StoreError> {
        let migrations_report = migrations::runner().run_async(&mut self.client).await?;

        for migration in migrations_report.applied_migrations() {
            tracing::info!(
                "Migration Applied -  Name: {}, Version: {}",
                migration.name(),
                migration.version()
            );
        }

        tracing::info!("DB migrations finished!");

        Ok(())
    }

    /// Fails fast once the connection task has ended.
    fn client(&self) -> Result<&Client, StoreError> {
        if self.client.is_closed() {
            return Err(StoreError::Unavailable("database connection closed".to_string()));
        }
        Ok(&self.client)
    }

    /// Removes every note. Returns the number of deleted rows.
    pub async fn clear(&self) -> Result<u64, StoreError> {
        Ok(self.client()?.execute("DELETE FROM notes", &[]).await?)
    }
}

fn note_from_row(row: &Row) -> Note {
    Note {
        id: NoteId::from(row.get::<_, Uuid>("id")),
        content: row.get("content"),
        important: row.get("important"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[async_trait]
impl NoteStore for PgRepository {
    async fn list_notes(&self) -> Result<Vec<Note>, StoreError> {
        let rows = self
            .client()?
            .query(
                &format!("SELECT {NOTE_COLUMNS} FROM notes ORDER BY created_at, id"),
                &[],
            )
            .await?;

        Ok(rows.iter().map(note_from_row).collect())
    }

    async fn create_note(&self, content: String, important: bool) -> Result<Note, StoreError> {
        let id = NoteId::new();
        let row = self
            .client()?
            .query_one(
                &format!(
                    "INSERT INTO notes (id, content, important) VALUES ($1, $2, $3) \
                     RETURNING {NOTE_COLUMNS}"
                ),
                &[id.as_uuid(), &content, &important],
            )
            .await?;

        Ok(note_from_row(&row))
    }

    async fn get_note(&self, id: NoteId) -> Result<Option<Note>, StoreError> {
        let row = self
            .client()?
            .query_opt(
                &format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = $1"),
                &[id.as_uuid()],
            )
            .await?;

        Ok(row.as_ref().map(note_from_row))
    }

    async fn update_note(
        &self,
        id: NoteId,
        content: String,
        important: Option<bool>,
    ) -> Result<Option<Note>, StoreError> {
        let row = self
            .client()?
            .query_opt(
                &format!(
                    "UPDATE notes SET content = $1, important = COALESCE($2, important), \
                     updated_at = NOW() WHERE id = $3 RETURNING {NOTE_COLUMNS}"
                ),
                &[&content, &important, id.as_uuid()],
            )
            .await?;

        Ok(row.as_ref().map(note_from_row))
    }

    async fn delete_note(&self, id: NoteId) -> Result<bool, StoreError> {
        let rows = self
            .client()?
            .execute("DELETE FROM notes WHERE id = $1", &[id.as_uuid()])
            .await?;

        Ok(rows == 1)
    }
}
