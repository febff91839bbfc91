use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::contract::{
    Assignment, AssignmentPatch, AssignmentStatus, EntryId, Exam, ExamPatch, FieldUpdate,
    NewAssignment, NewExam, NewNote, NewTimetableEntry, Note, NotePatch, Priority, TimetableEntry,
    TimetableEntryPatch,
};

/// Presence-tracking deserializer: an absent key stays `None`, a present
/// key (including explicit null) becomes `Some(..)`. Pair with
/// `#[serde(default)]`.
fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

// ---------- shared enums ----------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatusDto {
    Pending,
    Completed,
}

impl From<AssignmentStatus> for AssignmentStatusDto {
    fn from(s: AssignmentStatus) -> Self {
        match s {
            AssignmentStatus::Pending => Self::Pending,
            AssignmentStatus::Completed => Self::Completed,
        }
    }
}

impl From<AssignmentStatusDto> for AssignmentStatus {
    fn from(s: AssignmentStatusDto) -> Self {
        match s {
            AssignmentStatusDto::Pending => Self::Pending,
            AssignmentStatusDto::Completed => Self::Completed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityDto {
    Low,
    Medium,
    High,
}

impl From<Priority> for PriorityDto {
    fn from(p: Priority) -> Self {
        match p {
            Priority::Low => Self::Low,
            Priority::Medium => Self::Medium,
            Priority::High => Self::High,
        }
    }
}

impl From<PriorityDto> for Priority {
    fn from(p: PriorityDto) -> Self {
        match p {
            PriorityDto::Low => Self::Low,
            PriorityDto::Medium => Self::Medium,
            PriorityDto::High => Self::High,
        }
    }
}

// ---------- timetable ----------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableEntryDto {
    pub id: EntryId,
    pub subject: String,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTimetableEntryReq {
    pub subject: String,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default)]
    pub teacher: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTimetableEntryReq {
    pub subject: Option<String>,
    pub day: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub room: Option<String>,
    pub teacher: Option<String>,
}

impl From<TimetableEntry> for TimetableEntryDto {
    fn from(e: TimetableEntry) -> Self {
        Self {
            id: e.id,
            subject: e.subject,
            day: e.day,
            start_time: e.start_time,
            end_time: e.end_time,
            room: e.room,
            teacher: e.teacher,
        }
    }
}

impl From<CreateTimetableEntryReq> for NewTimetableEntry {
    fn from(req: CreateTimetableEntryReq) -> Self {
        Self {
            subject: req.subject,
            day: req.day,
            start_time: req.start_time,
            end_time: req.end_time,
            room: req.room,
            teacher: req.teacher,
        }
    }
}

impl From<UpdateTimetableEntryReq> for TimetableEntryPatch {
    fn from(req: UpdateTimetableEntryReq) -> Self {
        Self {
            subject: req.subject,
            day: req.day,
            start_time: req.start_time,
            end_time: req.end_time,
            room: req.room,
            teacher: req.teacher,
        }
    }
}

// ---------- assignments ----------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentDto {
    pub id: EntryId,
    pub title: String,
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub status: AssignmentStatusDto,
    pub priority: PriorityDto,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAssignmentReq {
    pub title: String,
    pub subject: String,
    #[serde(default)]
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub status: Option<AssignmentStatusDto>,
    #[serde(default)]
    pub priority: Option<PriorityDto>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAssignmentReq {
    pub title: Option<String>,
    pub subject: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub status: Option<AssignmentStatusDto>,
    pub priority: Option<PriorityDto>,
}

impl From<Assignment> for AssignmentDto {
    fn from(a: Assignment) -> Self {
        Self {
            id: a.id,
            title: a.title,
            subject: a.subject,
            description: a.description,
            due_date: a.due_date,
            status: a.status.into(),
            priority: a.priority.into(),
            created_at: a.created_at,
        }
    }
}

impl From<CreateAssignmentReq> for NewAssignment {
    fn from(req: CreateAssignmentReq) -> Self {
        Self {
            title: req.title,
            subject: req.subject,
            description: req.description,
            due_date: req.due_date,
            status: req.status.map(Into::into).unwrap_or(AssignmentStatus::Pending),
            priority: req.priority.map(Into::into).unwrap_or(Priority::Medium),
        }
    }
}

impl From<UpdateAssignmentReq> for AssignmentPatch {
    fn from(req: UpdateAssignmentReq) -> Self {
        Self {
            title: req.title,
            subject: req.subject,
            description: req.description,
            due_date: req.due_date,
            status: req.status.map(Into::into),
            priority: req.priority.map(Into::into),
        }
    }
}

// ---------- exams ----------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamDto {
    pub id: EntryId,
    pub subject: String,
    pub exam_type: String,
    pub exam_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExamReq {
    pub subject: String,
    pub exam_type: String,
    pub exam_date: DateTime<Utc>,
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateExamReq {
    pub subject: Option<String>,
    pub exam_type: Option<String>,
    pub exam_date: Option<DateTime<Utc>>,
    pub room: Option<String>,
    pub notes: Option<String>,
}

impl From<Exam> for ExamDto {
    fn from(e: Exam) -> Self {
        Self {
            id: e.id,
            subject: e.subject,
            exam_type: e.exam_type,
            exam_date: e.exam_date,
            room: e.room,
            notes: e.notes,
            created_at: e.created_at,
        }
    }
}

impl From<CreateExamReq> for NewExam {
    fn from(req: CreateExamReq) -> Self {
        Self {
            subject: req.subject,
            exam_type: req.exam_type,
            exam_date: req.exam_date,
            room: req.room,
            notes: req.notes,
        }
    }
}

impl From<UpdateExamReq> for ExamPatch {
    fn from(req: UpdateExamReq) -> Self {
        Self {
            subject: req.subject,
            exam_type: req.exam_type,
            exam_date: req.exam_date,
            room: req.room,
            notes: req.notes,
        }
    }
}

// ---------- notes ----------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteDto {
    pub id: EntryId,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNoteReq {
    pub title: String,
    pub content: String,
}

/// Presence patch: key absent = keep, key null = explicit null (rejected by
/// the service for these non-nullable fields), key value = overwrite.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateNoteReq {
    #[serde(default, deserialize_with = "double_option")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub content: Option<Option<String>>,
}

impl From<Note> for NoteDto {
    fn from(n: Note) -> Self {
        Self {
            id: n.id,
            title: n.title,
            content: n.content,
            created_at: n.created_at,
            updated_at: n.updated_at,
        }
    }
}

impl From<CreateNoteReq> for NewNote {
    fn from(req: CreateNoteReq) -> Self {
        Self {
            title: req.title,
            content: req.content,
        }
    }
}

impl From<UpdateNoteReq> for NotePatch {
    fn from(req: UpdateNoteReq) -> Self {
        Self {
            title: FieldUpdate::from_double_option(req.title),
            content: FieldUpdate::from_double_option(req.content),
        }
    }
}
