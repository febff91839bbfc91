//! Timetable store operations.

use sea_orm::{DbErr, TransactionTrait};
use tracing::{info, instrument};

use crate::contract::{EntryId, NewTimetableEntry, TimetableEntry, TimetableEntryPatch, UserId};
use crate::domain::error::{PlannerError, Resource};
use crate::domain::service::{check_day, check_len, check_time, internal, require_text, Service};
use crate::infra::storage::{self, timetable};

impl Service {
    #[instrument(name = "planner.service.list_timetable", skip(self), fields(owner = owner))]
    pub async fn list_timetable(&self, owner: UserId) -> Result<Vec<TimetableEntry>, PlannerError> {
        let rows = timetable::list(self.db(), owner).await.map_err(internal)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(
        name = "planner.service.timetable_by_day",
        skip(self),
        fields(owner = owner, day = %day)
    )]
    pub async fn timetable_by_day(
        &self,
        owner: UserId,
        day: &str,
    ) -> Result<Vec<TimetableEntry>, PlannerError> {
        let rows = timetable::list_by_day(self.db(), owner, day)
            .await
            .map_err(internal)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(name = "planner.service.create_timetable_entry", skip(self, new), fields(owner = owner))]
    pub async fn create_timetable_entry(
        &self,
        owner: UserId,
        new: NewTimetableEntry,
    ) -> Result<TimetableEntry, PlannerError> {
        validate_new_entry(&new)?;

        let row = timetable::insert(self.db(), owner, new)
            .await
            .map_err(internal)?;

        info!("Created timetable entry {}", row.id);
        Ok(row.into())
    }

    #[instrument(name = "planner.service.get_timetable_entry", skip(self), fields(owner = owner, id = id))]
    pub async fn get_timetable_entry(
        &self,
        owner: UserId,
        id: EntryId,
    ) -> Result<TimetableEntry, PlannerError> {
        let row = storage::find_owned::<timetable::Entity, _>(self.db(), owner, id)
            .await
            .map_err(internal)?
            .ok_or(PlannerError::not_found(Resource::Timetable))?;
        Ok(row.into())
    }

    /// Null-skip partial update: only supplied, non-null fields change.
    #[instrument(name = "planner.service.update_timetable_entry", skip(self, patch), fields(owner = owner, id = id))]
    pub async fn update_timetable_entry(
        &self,
        owner: UserId,
        id: EntryId,
        patch: TimetableEntryPatch,
    ) -> Result<TimetableEntry, PlannerError> {
        validate_entry_patch(&patch)?;

        let txn = self.db().begin().await.map_err(internal)?;

        let mut entry: TimetableEntry =
            storage::find_owned::<timetable::Entity, _>(&txn, owner, id)
                .await
                .map_err(internal)?
                .ok_or(PlannerError::not_found(Resource::Timetable))?
                .into();

        if let Some(subject) = patch.subject {
            entry.subject = subject;
        }
        if let Some(day) = patch.day {
            entry.day = day;
        }
        if let Some(start_time) = patch.start_time {
            entry.start_time = start_time;
        }
        if let Some(end_time) = patch.end_time {
            entry.end_time = end_time;
        }
        if let Some(room) = patch.room {
            entry.room = Some(room);
        }
        if let Some(teacher) = patch.teacher {
            entry.teacher = Some(teacher);
        }

        let row = timetable::persist(&txn, owner, entry)
            .await
            .map_err(map_update_err)?;
        txn.commit().await.map_err(internal)?;

        Ok(row.into())
    }

    #[instrument(name = "planner.service.delete_timetable_entry", skip(self), fields(owner = owner, id = id))]
    pub async fn delete_timetable_entry(
        &self,
        owner: UserId,
        id: EntryId,
    ) -> Result<(), PlannerError> {
        let deleted = storage::delete_owned::<timetable::Entity, _>(self.db(), owner, id)
            .await
            .map_err(internal)?;

        if !deleted {
            return Err(PlannerError::not_found(Resource::Timetable));
        }

        info!("Deleted timetable entry {}", id);
        Ok(())
    }
}

/// A row deleted between the scoped read and the write is a NotFound, not an
/// internal error.
fn map_update_err(e: DbErr) -> PlannerError {
    match e {
        DbErr::RecordNotUpdated => PlannerError::not_found(Resource::Timetable),
        other => internal(other),
    }
}

fn validate_new_entry(new: &NewTimetableEntry) -> Result<(), PlannerError> {
    require_text("subject", &new.subject, 100)?;
    check_day("day", &new.day)?;
    check_time("start_time", &new.start_time)?;
    check_time("end_time", &new.end_time)?;
    if let Some(ref room) = new.room {
        check_len("room", room, 50)?;
    }
    if let Some(ref teacher) = new.teacher {
        check_len("teacher", teacher, 100)?;
    }
    Ok(())
}

fn validate_entry_patch(patch: &TimetableEntryPatch) -> Result<(), PlannerError> {
    if let Some(ref subject) = patch.subject {
        require_text("subject", subject, 100)?;
    }
    if let Some(ref day) = patch.day {
        check_day("day", day)?;
    }
    if let Some(ref start_time) = patch.start_time {
        check_time("start_time", start_time)?;
    }
    if let Some(ref end_time) = patch.end_time {
        check_time("end_time", end_time)?;
    }
    if let Some(ref room) = patch.room {
        check_len("room", room, 50)?;
    }
    if let Some(ref teacher) = patch.teacher {
        check_len("teacher", teacher, 100)?;
    }
    Ok(())
}
