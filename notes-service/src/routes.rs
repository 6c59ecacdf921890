//! Axum route handlers for the notes REST API.
//!
//! Each handler makes exactly one store call and converts the outcome into a
//! status code plus a JSON body. Every failure body is `{ "message": ... }`.

use crate::error::StoreError;
use crate::store::NoteStore;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::{Method, StatusCode, Uri};
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use notes_types::*;
use std::sync::Arc;

/// Version from Cargo.toml, available at compile time
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const NOTES_PREFIX: &str = "/api/notes";

const NOT_FOUND_MESSAGE: &str = "Note not found";

pub struct AppState {
    pub store: NoteStore,
}

type ApiError = (StatusCode, Json<MessageResponse>);
type ApiResult<T> = Result<(StatusCode, Json<T>), ApiError>;

/// Note and health routes. State and middleware are attached by the caller.
pub fn note_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/health", get(health).fallback(method_not_allowed))
        .route(NOTES_PREFIX, get(list_notes).fallback(method_not_allowed))
        .route(
            &format!("{}/", NOTES_PREFIX),
            get(list_notes).fallback(method_not_allowed),
        )
        .route(
            &format!("{}/createNote", NOTES_PREFIX),
            post(create_note).fallback(method_not_allowed),
        )
        .route(
            &format!("{}/:id", NOTES_PREFIX),
            get(get_note)
                .put(update_note)
                .delete(delete_note)
                .fallback(method_not_allowed),
        )
        .fallback(route_not_found)
}

fn error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(MessageResponse::new(message)))
}

fn not_found() -> ApiError {
    error(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE)
}

fn bad_body(rejection: JsonRejection) -> ApiError {
    log::warn!("[NOTES] Rejected request body: {}", rejection.body_text());
    error(StatusCode::BAD_REQUEST, rejection.body_text())
}

fn bad_path(rejection: PathRejection) -> ApiError {
    log::warn!("[NOTES] Rejected note id: {}", rejection.body_text());
    error(StatusCode::BAD_REQUEST, rejection.body_text())
}

fn store_error(e: StoreError) -> ApiError {
    match e {
        StoreError::Validation(_) | StoreError::InvalidId(_) => {
            log::warn!("[NOTES] {}", e);
            error(StatusCode::BAD_REQUEST, e.to_string())
        }
        StoreError::Unavailable(_) => {
            log::error!("[NOTES] {}", e);
            error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    error(
        StatusCode::METHOD_NOT_ALLOWED,
        format!("Method {} not allowed on {}", method, uri.path()),
    )
}

async fn route_not_found(uri: Uri) -> ApiError {
    error(StatusCode::NOT_FOUND, format!("No route for {}", uri.path()))
}

// GET /api/health
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": VERSION
    }))
}

// POST /api/notes/createNote
async fn create_note(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateNoteRequest>, JsonRejection>,
) -> ApiResult<Note> {
    let Json(req) = body.map_err(bad_body)?;

    let note = state.store.insert(req).map_err(store_error)?;
    Ok((StatusCode::CREATED, Json(note)))
}

// GET /api/notes
async fn list_notes(State(state): State<Arc<AppState>>) -> ApiResult<Vec<Note>> {
    let notes = state.store.list_all().map_err(store_error)?;
    Ok((StatusCode::OK, Json(notes)))
}

// GET /api/notes/:id
async fn get_note(
    State(state): State<Arc<AppState>>,
    id: Result<Path<String>, PathRejection>,
) -> ApiResult<Note> {
    let Path(id) = id.map_err(bad_path)?;

    match state.store.find_by_id(&id).map_err(store_error)? {
        Some(note) => Ok((StatusCode::OK, Json(note))),
        None => Err(not_found()),
    }
}

// PUT /api/notes/:id
async fn update_note(
    State(state): State<Arc<AppState>>,
    id: Result<Path<String>, PathRejection>,
    body: Result<Json<UpdateNoteRequest>, JsonRejection>,
) -> ApiResult<Note> {
    let Path(id) = id.map_err(bad_path)?;
    let Json(patch) = body.map_err(bad_body)?;

    if patch.is_empty() {
        log::debug!("[NOTES] Update for {} carries no fields, only touching updatedAt", id);
    }

    match state.store.update_by_id(&id, patch).map_err(store_error)? {
        Some(note) => Ok((StatusCode::OK, Json(note))),
        None => Err(not_found()),
    }
}

// DELETE /api/notes/:id
async fn delete_note(
    State(state): State<Arc<AppState>>,
    id: Result<Path<String>, PathRejection>,
) -> ApiResult<MessageResponse> {
    let Path(id) = id.map_err(bad_path)?;

    if state.store.delete_by_id(&id).map_err(store_error)? {
        Ok((
            StatusCode::OK,
            Json(MessageResponse::new("Note deleted successfully")),
        ))
    } else {
        Err(not_found())
    }
}
