use axum::http::StatusCode;
use http_error::ApiError;

use crate::domain::error::IdentityError;

/// Map identity domain errors to the REST error envelope.
///
/// The three token failure modes carry distinct machine-readable codes;
/// credential failures deliberately share one message with no code.
pub fn map_identity_error(e: &IdentityError) -> ApiError {
    match e {
        IdentityError::EmailTaken | IdentityError::UsernameTaken => {
            ApiError::conflict(e.to_string())
        }
        IdentityError::InvalidCredentials => {
            ApiError::new(StatusCode::UNAUTHORIZED, e.to_string())
        }
        IdentityError::TokenExpired => ApiError::unauthorized(e.to_string(), "token_expired"),
        IdentityError::TokenInvalid => ApiError::unauthorized(e.to_string(), "invalid_token"),
        IdentityError::TokenMissing => {
            ApiError::unauthorized(e.to_string(), "authorization_required")
        }
        IdentityError::UserNotFound => ApiError::not_found(e.to_string()),
        IdentityError::Validation { field, message } => ApiError::validation(field, message),
        IdentityError::Internal { .. } => {
            tracing::error!(error = %e, "Internal identity error");
            ApiError::internal()
        }
    }
}
