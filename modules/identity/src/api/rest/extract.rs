//! Access-scoping extractors.
//!
//! Every protected handler takes one of these as an argument, so no
//! resource operation can run without a validated identity. The bound
//! user id is then passed explicitly into every store call.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use http_error::ApiError;

use crate::api::rest::error::map_identity_error;
use crate::contract::UserId;
use crate::domain::error::IdentityError;
use crate::security::{SessionSigner, TokenKind};

/// Identity extracted from a validated access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub UserId);

impl AuthUser {
    pub fn id(self) -> UserId {
        self.0
    }
}

/// Identity extracted from a validated refresh token (only `/refresh`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshUser(pub UserId);

impl RefreshUser {
    pub fn id(self) -> UserId {
        self.0
    }
}

fn bearer_token(parts: &Parts) -> Result<&str, IdentityError> {
    let header = parts
        .headers
        .get(header::AUTHORIZATION)
        .ok_or(IdentityError::TokenMissing)?;

    header
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
        .ok_or(IdentityError::TokenMissing)
}

fn validate_from_parts(parts: &Parts, kind: TokenKind) -> Result<UserId, ApiError> {
    let signer = parts
        .extensions
        .get::<Arc<SessionSigner>>()
        .cloned()
        .ok_or_else(|| {
            tracing::error!("SessionSigner extension is not installed");
            ApiError::internal()
        })?;

    let token = bearer_token(parts).map_err(|e| map_identity_error(&e))?;
    let session = signer
        .validate(token, kind)
        .map_err(|e| map_identity_error(&e))?;

    Ok(session.user)
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        validate_from_parts(parts, TokenKind::Access).map(AuthUser)
    }
}

impl<S> FromRequestParts<S> for RefreshUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        validate_from_parts(parts, TokenKind::Refresh).map(RefreshUser)
    }
}
