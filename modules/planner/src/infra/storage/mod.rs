//! Owned-collection storage.
//!
//! All four planner entities share one scoping contract: every row carries
//! its owner's user id, and every query is filtered by it. The generic
//! helpers here are the only way rows are addressed by id, so an entity
//! under a different owner is indistinguishable from a missing one.

use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, Select};

use crate::contract::{EntryId, UserId};

pub mod assignment;
pub mod exam;
pub mod note;
pub mod timetable;

/// An entity owned by exactly one user.
pub trait OwnedEntity: EntityTrait {
    fn id_column() -> Self::Column;
    fn owner_column() -> Self::Column;
}

/// Base query returning only the owner's rows.
pub fn select_owned<E: OwnedEntity>(owner: UserId) -> Select<E> {
    E::find().filter(E::owner_column().eq(owner))
}

/// Load a row by id, scoped to its owner.
pub async fn find_owned<E, C>(conn: &C, owner: UserId, id: EntryId) -> Result<Option<E::Model>, DbErr>
where
    E: OwnedEntity,
    C: ConnectionTrait,
{
    select_owned::<E>(owner)
        .filter(E::id_column().eq(id))
        .one(conn)
        .await
}

/// Delete a row by id, scoped to its owner, in a single statement.
/// Returns true if a row was deleted.
pub async fn delete_owned<E, C>(conn: &C, owner: UserId, id: EntryId) -> Result<bool, DbErr>
where
    E: OwnedEntity,
    C: ConnectionTrait,
{
    let res = E::delete_many()
        .filter(E::owner_column().eq(owner))
        .filter(E::id_column().eq(id))
        .exec(conn)
        .await?;
    Ok(res.rows_affected > 0)
}
