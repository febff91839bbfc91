use thiserror::Error;

/// Domain-specific errors using thiserror.
///
/// The credential and token messages are part of the API contract: both
/// login failure modes share one message, and the three token failure modes
/// map to distinct machine-readable codes at the REST boundary.
#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("A user with that email already exists.")]
    EmailTaken,

    #[error("A user with that username already exists.")]
    UsernameTaken,

    #[error("Invalid email or password.")]
    InvalidCredentials,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token.")]
    TokenInvalid,

    #[error("Authorization token required.")]
    TokenMissing,

    #[error("User not found.")]
    UserNotFound,

    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl IdentityError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
