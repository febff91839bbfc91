//! Assignment store operations, including the derived deadline queries.

use chrono::Utc;
use sea_orm::{DbErr, TransactionTrait};
use tracing::{info, instrument};

use crate::contract::{
    Assignment, AssignmentPatch, AssignmentStatus, EntryId, NewAssignment, UserId,
};
use crate::domain::error::{PlannerError, Resource};
use crate::domain::service::{check_len, internal, require_text, Service};
use crate::infra::storage::{self, assignment};

impl Service {
    #[instrument(name = "planner.service.list_assignments", skip(self), fields(owner = owner))]
    pub async fn list_assignments(&self, owner: UserId) -> Result<Vec<Assignment>, PlannerError> {
        let rows = assignment::list(self.db(), owner).await.map_err(internal)?;
        rows.into_iter().map(to_assignment).collect()
    }

    #[instrument(
        name = "planner.service.assignments_by_status",
        skip(self),
        fields(owner = owner, status = status.as_str())
    )]
    pub async fn assignments_by_status(
        &self,
        owner: UserId,
        status: AssignmentStatus,
    ) -> Result<Vec<Assignment>, PlannerError> {
        let rows = assignment::list_by_status(self.db(), owner, status.as_str())
            .await
            .map_err(internal)?;
        rows.into_iter().map(to_assignment).collect()
    }

    /// Open assignments due within the upcoming window, both ends inclusive.
    #[instrument(name = "planner.service.upcoming_assignments", skip(self), fields(owner = owner))]
    pub async fn upcoming_assignments(
        &self,
        owner: UserId,
    ) -> Result<Vec<Assignment>, PlannerError> {
        let now = Utc::now();
        let rows =
            assignment::list_due_between(self.db(), owner, now, now + self.upcoming_window())
                .await
                .map_err(internal)?;
        rows.into_iter().map(to_assignment).collect()
    }

    /// Open assignments already past their deadline.
    #[instrument(name = "planner.service.overdue_assignments", skip(self), fields(owner = owner))]
    pub async fn overdue_assignments(
        &self,
        owner: UserId,
    ) -> Result<Vec<Assignment>, PlannerError> {
        let rows = assignment::list_overdue(self.db(), owner, Utc::now())
            .await
            .map_err(internal)?;
        rows.into_iter().map(to_assignment).collect()
    }

    #[instrument(name = "planner.service.create_assignment", skip(self, new), fields(owner = owner))]
    pub async fn create_assignment(
        &self,
        owner: UserId,
        new: NewAssignment,
    ) -> Result<Assignment, PlannerError> {
        validate_new_assignment(&new)?;

        let row = assignment::insert(self.db(), owner, new, Utc::now())
            .await
            .map_err(internal)?;

        info!("Created assignment {}", row.id);
        to_assignment(row)
    }

    #[instrument(name = "planner.service.get_assignment", skip(self), fields(owner = owner, id = id))]
    pub async fn get_assignment(
        &self,
        owner: UserId,
        id: EntryId,
    ) -> Result<Assignment, PlannerError> {
        let row = storage::find_owned::<assignment::Entity, _>(self.db(), owner, id)
            .await
            .map_err(internal)?
            .ok_or(PlannerError::not_found(Resource::Assignment))?;
        to_assignment(row)
    }

    /// Null-skip partial update: only supplied, non-null fields change.
    #[instrument(name = "planner.service.update_assignment", skip(self, patch), fields(owner = owner, id = id))]
    pub async fn update_assignment(
        &self,
        owner: UserId,
        id: EntryId,
        patch: AssignmentPatch,
    ) -> Result<Assignment, PlannerError> {
        validate_assignment_patch(&patch)?;

        let txn = self.db().begin().await.map_err(internal)?;

        let mut a = to_assignment(
            storage::find_owned::<assignment::Entity, _>(&txn, owner, id)
                .await
                .map_err(internal)?
                .ok_or(PlannerError::not_found(Resource::Assignment))?,
        )?;

        if let Some(title) = patch.title {
            a.title = title;
        }
        if let Some(subject) = patch.subject {
            a.subject = subject;
        }
        if let Some(description) = patch.description {
            a.description = Some(description);
        }
        if let Some(due_date) = patch.due_date {
            a.due_date = due_date;
        }
        if let Some(status) = patch.status {
            a.status = status;
        }
        if let Some(priority) = patch.priority {
            a.priority = priority;
        }

        let row = assignment::persist(&txn, owner, a)
            .await
            .map_err(map_update_err)?;
        txn.commit().await.map_err(internal)?;

        to_assignment(row)
    }

    /// Shorthand mutation behind PATCH .../complete.
    #[instrument(name = "planner.service.complete_assignment", skip(self), fields(owner = owner, id = id))]
    pub async fn complete_assignment(
        &self,
        owner: UserId,
        id: EntryId,
    ) -> Result<Assignment, PlannerError> {
        let txn = self.db().begin().await.map_err(internal)?;

        let mut a = to_assignment(
            storage::find_owned::<assignment::Entity, _>(&txn, owner, id)
                .await
                .map_err(internal)?
                .ok_or(PlannerError::not_found(Resource::Assignment))?,
        )?;

        a.status = AssignmentStatus::Completed;

        let row = assignment::persist(&txn, owner, a)
            .await
            .map_err(map_update_err)?;
        txn.commit().await.map_err(internal)?;

        info!("Marked assignment {} completed", id);
        to_assignment(row)
    }

    #[instrument(name = "planner.service.delete_assignment", skip(self), fields(owner = owner, id = id))]
    pub async fn delete_assignment(&self, owner: UserId, id: EntryId) -> Result<(), PlannerError> {
        let deleted = storage::delete_owned::<assignment::Entity, _>(self.db(), owner, id)
            .await
            .map_err(internal)?;

        if !deleted {
            return Err(PlannerError::not_found(Resource::Assignment));
        }

        info!("Deleted assignment {}", id);
        Ok(())
    }
}

fn to_assignment(row: assignment::Model) -> Result<Assignment, PlannerError> {
    row.try_into()
        .map_err(|_| PlannerError::internal("stored status or priority value is unreadable"))
}

fn map_update_err(e: DbErr) -> PlannerError {
    match e {
        DbErr::RecordNotUpdated => PlannerError::not_found(Resource::Assignment),
        other => internal(other),
    }
}

fn validate_new_assignment(new: &NewAssignment) -> Result<(), PlannerError> {
    require_text("title", &new.title, 200)?;
    require_text("subject", &new.subject, 100)?;
    if let Some(ref description) = new.description {
        check_len("description", description, 10_000)?;
    }
    Ok(())
}

fn validate_assignment_patch(patch: &AssignmentPatch) -> Result<(), PlannerError> {
    if let Some(ref title) = patch.title {
        require_text("title", title, 200)?;
    }
    if let Some(ref subject) = patch.subject {
        require_text("subject", subject, 100)?;
    }
    if let Some(ref description) = patch.description {
        check_len("description", description, 10_000)?;
    }
    Ok(())
}
