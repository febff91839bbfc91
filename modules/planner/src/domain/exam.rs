//! Exam store operations.

use chrono::Utc;
use sea_orm::{DbErr, TransactionTrait};
use tracing::{info, instrument};

use crate::contract::{EntryId, Exam, ExamPatch, NewExam, UserId};
use crate::domain::error::{PlannerError, Resource};
use crate::domain::service::{check_len, internal, require_text, Service};
use crate::infra::storage::{self, exam};

impl Service {
    #[instrument(name = "planner.service.list_exams", skip(self), fields(owner = owner))]
    pub async fn list_exams(&self, owner: UserId) -> Result<Vec<Exam>, PlannerError> {
        let rows = exam::list(self.db(), owner).await.map_err(internal)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(
        name = "planner.service.exams_by_type",
        skip(self),
        fields(owner = owner, exam_type = %exam_type)
    )]
    pub async fn exams_by_type(
        &self,
        owner: UserId,
        exam_type: &str,
    ) -> Result<Vec<Exam>, PlannerError> {
        let rows = exam::list_by_type(self.db(), owner, exam_type)
            .await
            .map_err(internal)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Exams within the upcoming window, both ends inclusive. Unlike
    /// assignments there is no status to exclude.
    #[instrument(name = "planner.service.upcoming_exams", skip(self), fields(owner = owner))]
    pub async fn upcoming_exams(&self, owner: UserId) -> Result<Vec<Exam>, PlannerError> {
        let now = Utc::now();
        let rows = exam::list_between(self.db(), owner, now, now + self.upcoming_window())
            .await
            .map_err(internal)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(name = "planner.service.create_exam", skip(self, new), fields(owner = owner))]
    pub async fn create_exam(&self, owner: UserId, new: NewExam) -> Result<Exam, PlannerError> {
        validate_new_exam(&new)?;

        let row = exam::insert(self.db(), owner, new, Utc::now())
            .await
            .map_err(internal)?;

        info!("Created exam {}", row.id);
        Ok(row.into())
    }

    #[instrument(name = "planner.service.get_exam", skip(self), fields(owner = owner, id = id))]
    pub async fn get_exam(&self, owner: UserId, id: EntryId) -> Result<Exam, PlannerError> {
        let row = storage::find_owned::<exam::Entity, _>(self.db(), owner, id)
            .await
            .map_err(internal)?
            .ok_or(PlannerError::not_found(Resource::Exam))?;
        Ok(row.into())
    }

    /// Null-skip partial update: only supplied, non-null fields change.
    #[instrument(name = "planner.service.update_exam", skip(self, patch), fields(owner = owner, id = id))]
    pub async fn update_exam(
        &self,
        owner: UserId,
        id: EntryId,
        patch: ExamPatch,
    ) -> Result<Exam, PlannerError> {
        validate_exam_patch(&patch)?;

        let txn = self.db().begin().await.map_err(internal)?;

        let mut e: Exam = storage::find_owned::<exam::Entity, _>(&txn, owner, id)
            .await
            .map_err(internal)?
            .ok_or(PlannerError::not_found(Resource::Exam))?
            .into();

        if let Some(subject) = patch.subject {
            e.subject = subject;
        }
        if let Some(exam_type) = patch.exam_type {
            e.exam_type = exam_type;
        }
        if let Some(exam_date) = patch.exam_date {
            e.exam_date = exam_date;
        }
        if let Some(room) = patch.room {
            e.room = Some(room);
        }
        if let Some(notes) = patch.notes {
            e.notes = Some(notes);
        }

        let row = exam::persist(&txn, owner, e).await.map_err(map_update_err)?;
        txn.commit().await.map_err(internal)?;

        Ok(row.into())
    }

    #[instrument(name = "planner.service.delete_exam", skip(self), fields(owner = owner, id = id))]
    pub async fn delete_exam(&self, owner: UserId, id: EntryId) -> Result<(), PlannerError> {
        let deleted = storage::delete_owned::<exam::Entity, _>(self.db(), owner, id)
            .await
            .map_err(internal)?;

        if !deleted {
            return Err(PlannerError::not_found(Resource::Exam));
        }

        info!("Deleted exam {}", id);
        Ok(())
    }
}

fn map_update_err(e: DbErr) -> PlannerError {
    match e {
        DbErr::RecordNotUpdated => PlannerError::not_found(Resource::Exam),
        other => internal(other),
    }
}

fn validate_new_exam(new: &NewExam) -> Result<(), PlannerError> {
    require_text("subject", &new.subject, 100)?;
    require_text("exam_type", &new.exam_type, 50)?;
    if let Some(ref room) = new.room {
        check_len("room", room, 50)?;
    }
    if let Some(ref notes) = new.notes {
        check_len("notes", notes, 10_000)?;
    }
    Ok(())
}

fn validate_exam_patch(patch: &ExamPatch) -> Result<(), PlannerError> {
    if let Some(ref subject) = patch.subject {
        require_text("subject", subject, 100)?;
    }
    if let Some(ref exam_type) = patch.exam_type {
        require_text("exam_type", exam_type, 50)?;
    }
    if let Some(ref room) = patch.room {
        check_len("room", room, 50)?;
    }
    if let Some(ref notes) = patch.notes {
        check_len("notes", notes, 10_000)?;
    }
    Ok(())
}
