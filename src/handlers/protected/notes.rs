// handlers/protected/notes.rs - /api/notes/* handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::Value;

use super::parse_id;
use crate::app::AppState;
use crate::database::models::{Note, NoteInput};
use crate::error::ApiError;
use crate::middleware::{json_body, ApiResponse, ApiResult, Identity};

const NOT_FOUND: &str = "Note not found";
const INVALID_BODY: &str = "Invalid request data";

/// POST /api/notes/createNote - 201 with the stored note
pub async fn create(
    State(state): State<AppState>,
    Identity(user): Identity,
    payload: Result<Json<NoteInput>, JsonRejection>,
) -> ApiResult<Note> {
    let input = json_body(payload, INVALID_BODY)?;
    let note = state.store.create_note(user.id, &input).await?;

    tracing::debug!("Created note {} for user {}", note.id, user.id);
    Ok(ApiResponse::created(note))
}

/// GET /api/notes/getAllNotes - The caller's notes, `[]` when there are none
pub async fn list(State(state): State<AppState>, Identity(user): Identity) -> ApiResult<Vec<Note>> {
    let notes = state.store.list_notes(user.id).await?;
    Ok(ApiResponse::success(notes))
}

pub async fn get(
    State(state): State<AppState>,
    Identity(user): Identity,
    Path(id): Path<String>,
) -> ApiResult<Note> {
    let id = parse_id(&id, NOT_FOUND)?;
    let note = state
        .store
        .find_note(user.id, id)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    Ok(ApiResponse::success(note))
}

/// PUT /api/notes/updateNote/:id - Replace title and description
pub async fn update(
    State(state): State<AppState>,
    Identity(user): Identity,
    Path(id): Path<String>,
    payload: Result<Json<NoteInput>, JsonRejection>,
) -> ApiResult<Note> {
    let id = parse_id(&id, NOT_FOUND)?;
    if state.store.find_note(user.id, id).await?.is_none() {
        return Err(ApiError::not_found(NOT_FOUND));
    }

    let input = json_body(payload, INVALID_BODY)?;
    let note = state
        .store
        .update_note(user.id, id, &input)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    Ok(ApiResponse::success(note))
}

/// DELETE /api/notes/deleteNote/:id - Succeeds whether or not a row matched
pub async fn delete(
    State(state): State<AppState>,
    Identity(user): Identity,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    if let Ok(id) = id.parse::<i64>() {
        state.store.delete_note(user.id, id).await?;
    }
    Ok(ApiResponse::message("Note deleted successfully"))
}
