use std::sync::Arc;

use notes_api::{
    app,
    config::{self, Storage},
    repository::{MemoryRepository, NoteStore, PgRepository},
    service::NoteService,
};

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt::init();

    // Load config
    let cfg = config::load_config().unwrap_or_else(|e| {
        tracing::error!("Failed to load config: {e}");
        panic!("failed to load config: {e}");
    });
    tracing::info!("Successfully loaded notes API config");

    // Store creation and migration
    let store: Arc<dyn NoteStore> = match cfg.storage {
        Storage::Postgres => {
            let dsn = cfg.database_dsn.as_deref().unwrap_or_default();
            let mut repo = PgRepository::new(dsn).await.unwrap_or_else(|e| {
                tracing::error!("Failed to establish database connection: {e}");
                panic!("failed to establish database connection: {e}");
            });

            repo.migrate().await.unwrap_or_else(|e| {
                tracing::error!("Failed to migrate database: {e}");
                panic!("failed to migrate database: {e}");
            });

            Arc::new(repo)
        }
        Storage::Memory => {
            tracing::warn!("Using in-memory storage, notes are lost on shutdown");
            Arc::new(MemoryRepository::new())
        }
    };

    // Service creation
    let service = Arc::new(NoteService::new(store));
    let router = app(service);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", cfg.port))
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind to port {}: {e}", cfg.port);
            panic!("failed to bind to port {}: {e}", cfg.port);
        });

    if let Ok(addr) = listener.local_addr() {
        tracing::info!("Notes API starting, listening on {}", addr);
    }

    if let Err(e) = axum::serve(listener, router).await {
        tracing::error!("HTTP server error: {e}");
        panic!("failed to start HTTP server: {e}");
    }
}
