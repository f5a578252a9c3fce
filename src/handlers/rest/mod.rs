use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_macros::debug_handler;
use utoipa::OpenApi;

use std::sync::Arc;

use crate::{
    dto::{ErrorResponse, NotePayload, NoteResponse},
    models::ValidationError,
    service::{NoteService, ServiceError},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        create_note,
        update_note,
        delete_note,
        get_one_note,
        get_all_notes
    ),
    components(schemas(NoteResponse, NotePayload, ErrorResponse)),
    tags(
        (name = "notes", description = "Notes management API")
    )
)]
pub struct ApiDoc;

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(e) => error_response(StatusCode::BAD_REQUEST, e.to_string()),
            Self::MalformedId(_) => error_response(StatusCode::BAD_REQUEST, "malformatted id"),
            Self::NotFound(_) => error_response(StatusCode::NOT_FOUND, "note not found"),
            Self::Store(e) => {
                tracing::error!("note store failure: {}", e);
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
        }
    }
}

/// A body that cannot be read as a note payload counts as missing, except one
/// over the size limit, which is answered with 413 straight away.
fn read_payload(
    payload: Result<Json<NotePayload>, JsonRejection>,
) -> Result<Option<NotePayload>, Response> {
    match payload {
        Ok(Json(payload)) => Ok(Some(payload)),
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => Err(
            error_response(StatusCode::PAYLOAD_TOO_LARGE, "request body too large"),
        ),
        Err(rejection) => {
            tracing::debug!("rejected note body: {}", rejection.body_text());
            Ok(None)
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/notes",
    request_body = NotePayload,
    responses(
        (status = 201, description = "Note created successfully", body = NoteResponse),
        (status = 400, description = "Content missing or empty", body = ErrorResponse),
        (status = 413, description = "Request body too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn create_note(
    State(service): State<Arc<NoteService>>,
    payload: Result<Json<NotePayload>, JsonRejection>,
) -> Response {
    let payload = match read_payload(payload) {
        Ok(Some(payload)) => payload,
        Ok(None) => return ServiceError::from(ValidationError::MissingBody).into_response(),
        Err(response) => return response,
    };

    match service.create_note(payload).await {
        Ok(note) => (StatusCode::CREATED, Json(note)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    put,
    path = "/api/notes/{id}",
    params(
        ("id" = String, Path, description = "Note ID")
    ),
    request_body = NotePayload,
    responses(
        (status = 200, description = "Note updated successfully", body = NoteResponse),
        (status = 400, description = "Malformed id, missing body or empty content", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 413, description = "Request body too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn update_note(
    State(service): State<Arc<NoteService>>,
    Path(id): Path<String>,
    payload: Result<Json<NotePayload>, JsonRejection>,
) -> Response {
    let payload = match read_payload(payload) {
        Ok(payload) => payload,
        Err(response) => return response,
    };

    match service.update_note(&id, payload).await {
        Ok(note) => (StatusCode::OK, Json(note)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/api/notes/{id}",
    params(
        ("id" = String, Path, description = "Note ID")
    ),
    responses(
        (status = 204, description = "Note deleted, or no note had this id"),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn delete_note(
    State(service): State<Arc<NoteService>>,
    Path(id): Path<String>,
) -> Response {
    match service.delete_note(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/notes/{id}",
    params(
        ("id" = String, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note found", body = NoteResponse),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_one_note(
    State(service): State<Arc<NoteService>>,
    Path(id): Path<String>,
) -> Response {
    match service.get_one_note(&id).await {
        Ok(note) => (StatusCode::OK, Json(note)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/notes",
    responses(
        (status = 200, description = "List of all notes", body = Vec<NoteResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_all_notes(State(service): State<Arc<NoteService>>) -> Response {
    match service.get_all_notes().await {
        Ok(notes) => (StatusCode::OK, Json(notes)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn unknown_endpoint() -> Response {
    error_response(StatusCode::NOT_FOUND, "unknown endpoint")
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::{
        body::Body,
        extract::FromRequest,
        http::{Request, header::CONTENT_TYPE},
    };

    // axum's default body limit
    const BODY_LIMIT: usize = 2 * 1024 * 1024;

    async fn extract(body: impl Into<Body>) -> Result<Json<NotePayload>, JsonRejection> {
        let request = Request::builder()
            .method("POST")
            .uri("/api/notes")
            .header(CONTENT_TYPE, "application/json")
            .body(body.into())
            .unwrap();

        Json::<NotePayload>::from_request(request, &()).await
    }

    #[tokio::test]
    async fn reads_valid_payload() {
        let payload = read_payload(extract(r#"{"content":"hi","important":true}"#).await)
            .unwrap()
            .unwrap();

        assert_eq!(payload.content.as_deref(), Some("hi"));
        assert_eq!(payload.important, Some(true));
    }

    #[tokio::test]
    async fn malformed_json_counts_as_missing() {
        let payload = read_payload(extract("{not json").await).unwrap();

        assert!(payload.is_none());
    }

    #[tokio::test]
    async fn oversized_body_is_413() {
        let body = format!(r#"{{"content":"{}"}}"#, "a".repeat(BODY_LIMIT));

        let response = read_payload(extract(body).await).unwrap_err();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
    }
}
