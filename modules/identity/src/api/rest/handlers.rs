use axum::{http::StatusCode, response::Json, Extension};
use std::sync::Arc;
use tracing::info;

use http_error::ApiError;

use crate::api::rest::dto::{
    LoginReq, LoginResp, MessageResp, RefreshResp, RegisterReq, UserDto,
};
use crate::api::rest::error::map_identity_error;
use crate::api::rest::extract::{AuthUser, RefreshUser};
use crate::domain::service::Service;

/// Register a new user account.
pub async fn register(
    Extension(svc): Extension<Arc<Service>>,
    Json(req): Json<RegisterReq>,
) -> Result<(StatusCode, Json<MessageResp>), ApiError> {
    info!("Registering user '{}'", req.username);

    svc.register(req.into())
        .await
        .map_err(|e| map_identity_error(&e))?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResp {
            message: "User registered successfully.".to_string(),
        }),
    ))
}

/// Login and get access + refresh tokens.
pub async fn login(
    Extension(svc): Extension<Arc<Service>>,
    Json(req): Json<LoginReq>,
) -> Result<Json<LoginResp>, ApiError> {
    let session = svc
        .login(&req.email, &req.password)
        .await
        .map_err(|e| map_identity_error(&e))?;

    Ok(Json(LoginResp {
        access_token: session.access_token,
        refresh_token: session.refresh_token,
        user: session.user.into(),
    }))
}

/// Mint a new (non-fresh) access token from a refresh token.
pub async fn refresh(
    Extension(svc): Extension<Arc<Service>>,
    user: RefreshUser,
) -> Result<Json<RefreshResp>, ApiError> {
    let access_token = svc
        .refresh(user.id())
        .await
        .map_err(|e| map_identity_error(&e))?;

    Ok(Json(RefreshResp { access_token }))
}

/// Get the current user's profile.
pub async fn me(
    Extension(svc): Extension<Arc<Service>>,
    user: AuthUser,
) -> Result<Json<UserDto>, ApiError> {
    let profile = svc
        .profile(user.id())
        .await
        .map_err(|e| map_identity_error(&e))?;

    Ok(Json(UserDto::from(profile)))
}

/// Delete the current account and everything it owns.
pub async fn delete_me(
    Extension(svc): Extension<Arc<Service>>,
    user: AuthUser,
) -> Result<StatusCode, ApiError> {
    svc.delete_account(user.id())
        .await
        .map_err(|e| map_identity_error(&e))?;

    Ok(StatusCode::NO_CONTENT)
}
