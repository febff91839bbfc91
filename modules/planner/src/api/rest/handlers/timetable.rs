use axum::{extract::Path, http::StatusCode, response::Json, Extension};
use std::sync::Arc;

use http_error::ApiError;
use identity::api::rest::extract::AuthUser;

use crate::api::rest::dto::{CreateTimetableEntryReq, TimetableEntryDto, UpdateTimetableEntryReq};
use crate::api::rest::error::map_planner_error;
use crate::contract::EntryId;
use crate::domain::service::Service;

/// Get all timetable entries for the current user.
pub async fn list(
    Extension(svc): Extension<Arc<Service>>,
    user: AuthUser,
) -> Result<Json<Vec<TimetableEntryDto>>, ApiError> {
    let entries = svc
        .list_timetable(user.id())
        .await
        .map_err(|e| map_planner_error(&e))?;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

/// Get timetable entries for a specific day.
pub async fn by_day(
    Extension(svc): Extension<Arc<Service>>,
    user: AuthUser,
    Path(day): Path<String>,
) -> Result<Json<Vec<TimetableEntryDto>>, ApiError> {
    let entries = svc
        .timetable_by_day(user.id(), &day)
        .await
        .map_err(|e| map_planner_error(&e))?;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

/// Add a new timetable entry.
pub async fn create(
    Extension(svc): Extension<Arc<Service>>,
    user: AuthUser,
    Json(req): Json<CreateTimetableEntryReq>,
) -> Result<(StatusCode, Json<TimetableEntryDto>), ApiError> {
    let entry = svc
        .create_timetable_entry(user.id(), req.into())
        .await
        .map_err(|e| map_planner_error(&e))?;
    Ok((StatusCode::CREATED, Json(entry.into())))
}

/// Get a specific timetable entry.
pub async fn get(
    Extension(svc): Extension<Arc<Service>>,
    user: AuthUser,
    Path(id): Path<EntryId>,
) -> Result<Json<TimetableEntryDto>, ApiError> {
    let entry = svc
        .get_timetable_entry(user.id(), id)
        .await
        .map_err(|e| map_planner_error(&e))?;
    Ok(Json(entry.into()))
}

/// Update a timetable entry.
pub async fn update(
    Extension(svc): Extension<Arc<Service>>,
    user: AuthUser,
    Path(id): Path<EntryId>,
    Json(req): Json<UpdateTimetableEntryReq>,
) -> Result<Json<TimetableEntryDto>, ApiError> {
    let entry = svc
        .update_timetable_entry(user.id(), id, req.into())
        .await
        .map_err(|e| map_planner_error(&e))?;
    Ok(Json(entry.into()))
}

/// Delete a timetable entry.
pub async fn delete(
    Extension(svc): Extension<Arc<Service>>,
    user: AuthUser,
    Path(id): Path<EntryId>,
) -> Result<StatusCode, ApiError> {
    svc.delete_timetable_entry(user.id(), id)
        .await
        .map_err(|e| map_planner_error(&e))?;
    Ok(StatusCode::NO_CONTENT)
}
