//! Implementation of the identity module's owned-data purge port.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter};

use identity::contract::UserId;
use identity::domain::ports::OwnedDataPurge;

use crate::infra::storage::{assignment, exam, note, timetable};

/// Deletes all four owned collections for an account inside the caller's
/// transaction; the user row itself is removed by the identity module.
pub struct PlannerDataPurge;

#[async_trait]
impl OwnedDataPurge for PlannerDataPurge {
    async fn purge_owner(&self, txn: &DatabaseTransaction, owner: UserId) -> anyhow::Result<()> {
        timetable::Entity::delete_many()
            .filter(timetable::Column::UserId.eq(owner))
            .exec(txn)
            .await?;
        assignment::Entity::delete_many()
            .filter(assignment::Column::UserId.eq(owner))
            .exec(txn)
            .await?;
        exam::Entity::delete_many()
            .filter(exam::Column::UserId.eq(owner))
            .exec(txn)
            .await?;
        note::Entity::delete_many()
            .filter(note::Column::UserId.eq(owner))
            .exec(txn)
            .await?;
        Ok(())
    }
}
