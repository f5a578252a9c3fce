#![allow(dead_code)]

use std::sync::Arc;

use notes_api::{app, repository::NoteStore, service::NoteService};
use serde_json::Value;

pub const INITIAL_NOTES: [(&str, bool); 2] = [
    ("HTML is easy test", false),
    ("Browser can execute only JavaScript", true),
];

pub struct TestApi {
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestApi {
    pub fn notes_url(&self) -> String {
        format!("{}/api/notes", self.base_url)
    }

    pub fn note_url(&self, id: &str) -> String {
        format!("{}/api/notes/{id}", self.base_url)
    }

    /// Returns the listed notes and their contents.
    pub async fn get_all_notes(&self) -> (Vec<Value>, Vec<String>) {
        let response = self.client.get(self.notes_url()).send().await.unwrap();
        assert_eq!(response.status(), 200);

        let notes: Vec<Value> = response.json().await.unwrap();
        let contents = notes
            .iter()
            .map(|note| note["content"].as_str().unwrap().to_string())
            .collect();

        (notes, contents)
    }
}

pub async fn seed(store: &dyn NoteStore) {
    for (content, important) in INITIAL_NOTES {
        store.create_note(content.to_string(), important).await.unwrap();
    }
}

/// Serves the full router over `store` on an ephemeral port.
pub async fn spawn_app(store: Arc<dyn NoteStore>) -> TestApi {
    let router = app(Arc::new(NoteService::new(store)));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestApi {
        base_url: format!("http://{addr}"),
        client: reqwest::Client::new(),
    }
}

pub fn assert_json(response: &reqwest::Response) {
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    assert!(
        content_type.contains("application/json"),
        "unexpected content type: {content_type}"
    );
}
