pub mod config;
pub mod dto;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

use std::sync::Arc;

use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use handlers::rest;
use service::NoteService;

/// Full application router: the notes API under `/api/notes`, Swagger UI and
/// a JSON 404 for anything else.
pub fn app(service: Arc<NoteService>) -> Router {
    let api_router = Router::new()
        .route("/notes", get(rest::get_all_notes).post(rest::create_note))
        .route(
            "/notes/{id}",
            get(rest::get_one_note)
                .put(rest::update_note)
                .delete(rest::delete_note),
        )
        .with_state(service);

    Router::new()
        .route("/", get(root))
        .nest("/api", api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", rest::ApiDoc::openapi()))
        .fallback(rest::unknown_endpoint)
        .layer(TraceLayer::new_for_http())
}

async fn root() -> Response {
    (StatusCode::OK, "Notes API").into_response()
}
