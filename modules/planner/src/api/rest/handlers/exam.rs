use axum::{extract::Path, http::StatusCode, response::Json, Extension};
use std::sync::Arc;

use http_error::ApiError;
use identity::api::rest::extract::AuthUser;

use crate::api::rest::dto::{CreateExamReq, ExamDto, UpdateExamReq};
use crate::api::rest::error::map_planner_error;
use crate::contract::EntryId;
use crate::domain::service::Service;

/// Get all exams for the current user, earliest date first.
pub async fn list(
    Extension(svc): Extension<Arc<Service>>,
    user: AuthUser,
) -> Result<Json<Vec<ExamDto>>, ApiError> {
    let items = svc
        .list_exams(user.id())
        .await
        .map_err(|e| map_planner_error(&e))?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

/// Get exams by type (midterm/final/quiz).
pub async fn by_type(
    Extension(svc): Extension<Arc<Service>>,
    user: AuthUser,
    Path(exam_type): Path<String>,
) -> Result<Json<Vec<ExamDto>>, ApiError> {
    let items = svc
        .exams_by_type(user.id(), &exam_type)
        .await
        .map_err(|e| map_planner_error(&e))?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

/// Get exams scheduled in the next seven days.
pub async fn upcoming(
    Extension(svc): Extension<Arc<Service>>,
    user: AuthUser,
) -> Result<Json<Vec<ExamDto>>, ApiError> {
    let items = svc
        .upcoming_exams(user.id())
        .await
        .map_err(|e| map_planner_error(&e))?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

/// Create a new exam.
pub async fn create(
    Extension(svc): Extension<Arc<Service>>,
    user: AuthUser,
    Json(req): Json<CreateExamReq>,
) -> Result<(StatusCode, Json<ExamDto>), ApiError> {
    let item = svc
        .create_exam(user.id(), req.into())
        .await
        .map_err(|e| map_planner_error(&e))?;
    Ok((StatusCode::CREATED, Json(item.into())))
}

/// Get a specific exam.
pub async fn get(
    Extension(svc): Extension<Arc<Service>>,
    user: AuthUser,
    Path(id): Path<EntryId>,
) -> Result<Json<ExamDto>, ApiError> {
    let item = svc
        .get_exam(user.id(), id)
        .await
        .map_err(|e| map_planner_error(&e))?;
    Ok(Json(item.into()))
}

/// Update an exam.
pub async fn update(
    Extension(svc): Extension<Arc<Service>>,
    user: AuthUser,
    Path(id): Path<EntryId>,
    Json(req): Json<UpdateExamReq>,
) -> Result<Json<ExamDto>, ApiError> {
    let item = svc
        .update_exam(user.id(), id, req.into())
        .await
        .map_err(|e| map_planner_error(&e))?;
    Ok(Json(item.into()))
}

/// Delete an exam.
pub async fn delete(
    Extension(svc): Extension<Arc<Service>>,
    user: AuthUser,
    Path(id): Path<EntryId>,
) -> Result<StatusCode, ApiError> {
    svc.delete_exam(user.id(), id)
        .await
        .map_err(|e| map_planner_error(&e))?;
    Ok(StatusCode::NO_CONTENT)
}
