//! Note store operations.
//!
//! Notes use the presence merge policy: a key present in the patch is
//! authoritative even when null. Both note fields are non-nullable, so an
//! explicit null is a validation error rather than a silent skip — the
//! observable asymmetry with the other three stores.

use chrono::Utc;
use sea_orm::{DbErr, TransactionTrait};
use tracing::{info, instrument};

use crate::contract::{EntryId, FieldUpdate, NewNote, Note, NotePatch, UserId};
use crate::domain::error::{PlannerError, Resource};
use crate::domain::service::{internal, require_text, Service};
use crate::infra::storage::{self, note};

impl Service {
    #[instrument(name = "planner.service.list_notes", skip(self), fields(owner = owner))]
    pub async fn list_notes(&self, owner: UserId) -> Result<Vec<Note>, PlannerError> {
        let rows = note::list(self.db(), owner).await.map_err(internal)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(name = "planner.service.create_note", skip(self, new), fields(owner = owner))]
    pub async fn create_note(&self, owner: UserId, new: NewNote) -> Result<Note, PlannerError> {
        require_text("title", &new.title, 100)?;
        require_text("content", &new.content, 100_000)?;

        let row = note::insert(self.db(), owner, new, Utc::now())
            .await
            .map_err(internal)?;

        info!("Created note {}", row.id);
        Ok(row.into())
    }

    #[instrument(name = "planner.service.get_note", skip(self), fields(owner = owner, id = id))]
    pub async fn get_note(&self, owner: UserId, id: EntryId) -> Result<Note, PlannerError> {
        let row = storage::find_owned::<note::Entity, _>(self.db(), owner, id)
            .await
            .map_err(internal)?
            .ok_or(PlannerError::not_found(Resource::Note))?;
        Ok(row.into())
    }

    /// Presence-based partial update; refreshes `updated_at`.
    #[instrument(name = "planner.service.update_note", skip(self, patch), fields(owner = owner, id = id))]
    pub async fn update_note(
        &self,
        owner: UserId,
        id: EntryId,
        patch: NotePatch,
    ) -> Result<Note, PlannerError> {
        validate_note_patch(&patch)?;

        let txn = self.db().begin().await.map_err(internal)?;

        let mut n: Note = storage::find_owned::<note::Entity, _>(&txn, owner, id)
            .await
            .map_err(internal)?
            .ok_or(PlannerError::not_found(Resource::Note))?
            .into();

        patch.title.apply_to(&mut n.title);
        patch.content.apply_to(&mut n.content);
        n.updated_at = Utc::now();

        let row = note::persist(&txn, owner, n).await.map_err(map_update_err)?;
        txn.commit().await.map_err(internal)?;

        Ok(row.into())
    }

    #[instrument(name = "planner.service.delete_note", skip(self), fields(owner = owner, id = id))]
    pub async fn delete_note(&self, owner: UserId, id: EntryId) -> Result<(), PlannerError> {
        let deleted = storage::delete_owned::<note::Entity, _>(self.db(), owner, id)
            .await
            .map_err(internal)?;

        if !deleted {
            return Err(PlannerError::not_found(Resource::Note));
        }

        info!("Deleted note {}", id);
        Ok(())
    }
}

fn map_update_err(e: DbErr) -> PlannerError {
    match e {
        DbErr::RecordNotUpdated => PlannerError::not_found(Resource::Note),
        other => internal(other),
    }
}

fn validate_note_patch(patch: &NotePatch) -> Result<(), PlannerError> {
    match &patch.title {
        FieldUpdate::Keep => {}
        FieldUpdate::Clear => {
            return Err(PlannerError::validation("title", "may not be null"));
        }
        FieldUpdate::Set(title) => require_text("title", title, 100)?,
    }
    match &patch.content {
        FieldUpdate::Keep => {}
        FieldUpdate::Clear => {
            return Err(PlannerError::validation("content", "may not be null"));
        }
        FieldUpdate::Set(content) => require_text("content", content, 100_000)?,
    }
    Ok(())
}
