use axum::{extract::Path, http::StatusCode, response::Json, Extension};
use std::sync::Arc;

use http_error::ApiError;
use identity::api::rest::extract::AuthUser;

use crate::api::rest::dto::{CreateNoteReq, NoteDto, UpdateNoteReq};
use crate::api::rest::error::map_planner_error;
use crate::contract::EntryId;
use crate::domain::service::Service;

/// Get all notes for the current user, newest first.
pub async fn list(
    Extension(svc): Extension<Arc<Service>>,
    user: AuthUser,
) -> Result<Json<Vec<NoteDto>>, ApiError> {
    let items = svc
        .list_notes(user.id())
        .await
        .map_err(|e| map_planner_error(&e))?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

/// Create a new note.
pub async fn create(
    Extension(svc): Extension<Arc<Service>>,
    user: AuthUser,
    Json(req): Json<CreateNoteReq>,
) -> Result<(StatusCode, Json<NoteDto>), ApiError> {
    let item = svc
        .create_note(user.id(), req.into())
        .await
        .map_err(|e| map_planner_error(&e))?;
    Ok((StatusCode::CREATED, Json(item.into())))
}

/// Get a specific note.
pub async fn get(
    Extension(svc): Extension<Arc<Service>>,
    user: AuthUser,
    Path(id): Path<EntryId>,
) -> Result<Json<NoteDto>, ApiError> {
    let item = svc
        .get_note(user.id(), id)
        .await
        .map_err(|e| map_planner_error(&e))?;
    Ok(Json(item.into()))
}

/// Update a note (presence semantics, refreshes `updated_at`).
pub async fn update(
    Extension(svc): Extension<Arc<Service>>,
    user: AuthUser,
    Path(id): Path<EntryId>,
    Json(req): Json<UpdateNoteReq>,
) -> Result<Json<NoteDto>, ApiError> {
    let item = svc
        .update_note(user.id(), id, req.into())
        .await
        .map_err(|e| map_planner_error(&e))?;
    Ok(Json(item.into()))
}

/// Delete a note.
pub async fn delete(
    Extension(svc): Extension<Arc<Service>>,
    user: AuthUser,
    Path(id): Path<EntryId>,
) -> Result<StatusCode, ApiError> {
    svc.delete_note(user.id(), id)
        .await
        .map_err(|e| map_planner_error(&e))?;
    Ok(StatusCode::NO_CONTENT)
}
