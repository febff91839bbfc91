use axum::{extract::Path, http::StatusCode, response::Json, Extension};
use std::sync::Arc;

use http_error::ApiError;
use identity::api::rest::extract::AuthUser;

use crate::api::rest::dto::{AssignmentDto, CreateAssignmentReq, UpdateAssignmentReq};
use crate::api::rest::error::map_planner_error;
use crate::contract::{AssignmentStatus, EntryId};
use crate::domain::service::Service;

/// Get all assignments for the current user, earliest deadline first.
pub async fn list(
    Extension(svc): Extension<Arc<Service>>,
    user: AuthUser,
) -> Result<Json<Vec<AssignmentDto>>, ApiError> {
    let items = svc
        .list_assignments(user.id())
        .await
        .map_err(|e| map_planner_error(&e))?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

/// Get assignments by status (pending/completed).
pub async fn by_status(
    Extension(svc): Extension<Arc<Service>>,
    user: AuthUser,
    Path(status): Path<String>,
) -> Result<Json<Vec<AssignmentDto>>, ApiError> {
    let status: AssignmentStatus = status
        .parse()
        .map_err(|_| ApiError::validation("status", "must be one of: pending, completed"))?;

    let items = svc
        .assignments_by_status(user.id(), status)
        .await
        .map_err(|e| map_planner_error(&e))?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

/// Get open assignments due in the next seven days.
pub async fn upcoming(
    Extension(svc): Extension<Arc<Service>>,
    user: AuthUser,
) -> Result<Json<Vec<AssignmentDto>>, ApiError> {
    let items = svc
        .upcoming_assignments(user.id())
        .await
        .map_err(|e| map_planner_error(&e))?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

/// Get open assignments past their due date.
pub async fn overdue(
    Extension(svc): Extension<Arc<Service>>,
    user: AuthUser,
) -> Result<Json<Vec<AssignmentDto>>, ApiError> {
    let items = svc
        .overdue_assignments(user.id())
        .await
        .map_err(|e| map_planner_error(&e))?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

/// Create a new assignment.
pub async fn create(
    Extension(svc): Extension<Arc<Service>>,
    user: AuthUser,
    Json(req): Json<CreateAssignmentReq>,
) -> Result<(StatusCode, Json<AssignmentDto>), ApiError> {
    let item = svc
        .create_assignment(user.id(), req.into())
        .await
        .map_err(|e| map_planner_error(&e))?;
    Ok((StatusCode::CREATED, Json(item.into())))
}

/// Get a specific assignment.
pub async fn get(
    Extension(svc): Extension<Arc<Service>>,
    user: AuthUser,
    Path(id): Path<EntryId>,
) -> Result<Json<AssignmentDto>, ApiError> {
    let item = svc
        .get_assignment(user.id(), id)
        .await
        .map_err(|e| map_planner_error(&e))?;
    Ok(Json(item.into()))
}

/// Update an assignment.
pub async fn update(
    Extension(svc): Extension<Arc<Service>>,
    user: AuthUser,
    Path(id): Path<EntryId>,
    Json(req): Json<UpdateAssignmentReq>,
) -> Result<Json<AssignmentDto>, ApiError> {
    let item = svc
        .update_assignment(user.id(), id, req.into())
        .await
        .map_err(|e| map_planner_error(&e))?;
    Ok(Json(item.into()))
}

/// Mark an assignment as completed.
pub async fn complete(
    Extension(svc): Extension<Arc<Service>>,
    user: AuthUser,
    Path(id): Path<EntryId>,
) -> Result<Json<AssignmentDto>, ApiError> {
    let item = svc
        .complete_assignment(user.id(), id)
        .await
        .map_err(|e| map_planner_error(&e))?;
    Ok(Json(item.into()))
}

/// Delete an assignment.
pub async fn delete(
    Extension(svc): Extension<Arc<Service>>,
    user: AuthUser,
    Path(id): Path<EntryId>,
) -> Result<StatusCode, ApiError> {
    svc.delete_assignment(user.id(), id)
        .await
        .map_err(|e| map_planner_error(&e))?;
    Ok(StatusCode::NO_CONTENT)
}
