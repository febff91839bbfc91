use thiserror::Error;

/// The four owned collections, for error wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Timetable,
    Assignment,
    Exam,
    Note,
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Resource::Timetable => "Timetable entry",
            Resource::Assignment => "Assignment",
            Resource::Exam => "Exam",
            Resource::Note => "Note",
        };
        f.write_str(name)
    }
}

/// Domain-specific errors using thiserror.
///
/// Ownership mismatches are reported as NotFound: an entity under another
/// owner is indistinguishable from a nonexistent one.
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("{0} not found.")]
    NotFound(Resource),

    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl PlannerError {
    pub fn not_found(resource: Resource) -> Self {
        Self::NotFound(resource)
    }

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
