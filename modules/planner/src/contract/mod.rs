pub mod model;
pub mod patch;

pub use model::{
    Assignment, AssignmentPatch, AssignmentStatus, EntryId, Exam, ExamPatch, NewAssignment,
    NewExam, NewNote, NewTimetableEntry, Note, NotePatch, Priority, TimetableEntry,
    TimetableEntryPatch, UserId,
};
pub use patch::FieldUpdate;
