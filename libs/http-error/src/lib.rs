//! Shared REST error envelope.
//!
//! Every error leaving the API boundary is rendered as
//! `{"message": "...", "error": "<machine-readable code>"}` with the HTTP
//! status carrying the category. The `error` field is omitted when no
//! machine-readable code applies (e.g. plain not-found messages).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;

/// JSON body of every error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A fully-formed API error: status + body.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub code: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    /// 401 with a machine-readable code distinguishing the failure mode.
    pub fn unauthorized(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message).with_code(code)
    }

    /// 422 with field-level detail, code "validation".
    pub fn validation(field: &str, detail: impl AsRef<str>) -> Self {
        Self::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("{}: {}", field, detail.as_ref()),
        )
        .with_code("validation")
    }

    /// Generic 500; never leaks internal detail to the caller.
    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "An internal error occurred.",
        )
        .with_code("internal")
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            message: self.message.clone(),
            error: self.code.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = self.body();
        (self.status, Json(body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.status, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_includes_code_when_present() {
        let err = ApiError::unauthorized("Token has expired", "token_expired");
        let json = serde_json::to_value(err.body()).unwrap();
        assert_eq!(json["message"], "Token has expired");
        assert_eq!(json["error"], "token_expired");
    }

    #[test]
    fn body_omits_absent_code() {
        let err = ApiError::not_found("Assignment not found.");
        let json = serde_json::to_value(err.body()).unwrap();
        assert_eq!(json["message"], "Assignment not found.");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn validation_formats_field_detail() {
        let err = ApiError::validation("email", "must look like an email address");
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.message, "email: must look like an email address");
        assert_eq!(err.code.as_deref(), Some("validation"));
    }

    #[test]
    fn internal_hides_detail() {
        let err = ApiError::internal();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "An internal error occurred.");
    }
}
