use chrono::{DateTime, Utc};
use std::str::FromStr;

use crate::contract::patch::FieldUpdate;

pub use identity::contract::UserId;

/// Identity of an owned planner entity.
pub type EntryId = i32;

// ---------- timetable ----------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimetableEntry {
    pub id: EntryId,
    pub subject: String,
    /// Day-of-week token, e.g. "Monday".
    pub day: String,
    /// "HH:MM"; overlapping slots are permitted by design.
    pub start_time: String,
    pub end_time: String,
    pub room: Option<String>,
    pub teacher: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTimetableEntry {
    pub subject: String,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    pub room: Option<String>,
    pub teacher: Option<String>,
}

/// Null-skip patch: `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimetableEntryPatch {
    pub subject: Option<String>,
    pub day: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub room: Option<String>,
    pub teacher: Option<String>,
}

// ---------- assignments ----------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentStatus {
    Pending,
    Completed,
}

impl AssignmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AssignmentStatus::Pending => "pending",
            AssignmentStatus::Completed => "completed",
        }
    }
}

impl FromStr for AssignmentStatus {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(AssignmentStatus::Pending),
            "completed" => Ok(AssignmentStatus::Completed),
            _ => Err(UnknownToken),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl FromStr for Priority {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(UnknownToken),
        }
    }
}

/// A token outside the closed set of an enum-valued field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownToken;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub id: EntryId,
    pub title: String,
    pub subject: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub status: AssignmentStatus,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAssignment {
    pub title: String,
    pub subject: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub status: AssignmentStatus,
    pub priority: Priority,
}

/// Null-skip patch: `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentPatch {
    pub title: Option<String>,
    pub subject: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub status: Option<AssignmentStatus>,
    pub priority: Option<Priority>,
}

// ---------- exams ----------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exam {
    pub id: EntryId,
    pub subject: String,
    /// Free-form token, conventionally midterm/final/quiz.
    pub exam_type: String,
    pub exam_date: DateTime<Utc>,
    pub room: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExam {
    pub subject: String,
    pub exam_type: String,
    pub exam_date: DateTime<Utc>,
    pub room: Option<String>,
    pub notes: Option<String>,
}

/// Null-skip patch: `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExamPatch {
    pub subject: Option<String>,
    pub exam_type: Option<String>,
    pub exam_date: Option<DateTime<Utc>>,
    pub room: Option<String>,
    pub notes: Option<String>,
}

// ---------- notes ----------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: EntryId,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation.
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub title: String,
    pub content: String,
}

/// Presence patch: a present key is authoritative, including explicit null.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: FieldUpdate<String>,
    pub content: FieldUpdate<String>,
}
