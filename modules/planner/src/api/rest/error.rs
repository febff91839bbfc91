use http_error::ApiError;

use crate::domain::error::PlannerError;

/// Map planner domain errors to the REST error envelope.
pub fn map_planner_error(e: &PlannerError) -> ApiError {
    match e {
        PlannerError::NotFound(_) => ApiError::not_found(e.to_string()),
        PlannerError::Validation { field, message } => ApiError::validation(field, message),
        PlannerError::Internal { .. } => {
            tracing::error!(error = %e, "Internal planner error");
            ApiError::internal()
        }
    }
}
