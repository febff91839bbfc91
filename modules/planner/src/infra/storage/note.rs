use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, NotSet, QueryOrder, Set};

use crate::contract::{NewNote, Note, UserId};
use crate::infra::storage::{select_owned, OwnedEntity};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "notes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl OwnedEntity for Entity {
    fn id_column() -> Column {
        Column::Id
    }

    fn owner_column() -> Column {
        Column::UserId
    }
}

impl From<Model> for Note {
    fn from(m: Model) -> Self {
        Note {
            id: m.id,
            title: m.title,
            content: m.content,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// All notes for the owner, newest first.
pub async fn list<C: ConnectionTrait>(conn: &C, owner: UserId) -> Result<Vec<Model>, DbErr> {
    select_owned::<Entity>(owner)
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id)
        .all(conn)
        .await
}

pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    owner: UserId,
    new: NewNote,
    created_at: DateTime<Utc>,
) -> Result<Model, DbErr> {
    let am = ActiveModel {
        id: NotSet,
        title: Set(new.title),
        content: Set(new.content),
        created_at: Set(created_at),
        updated_at: Set(created_at),
        user_id: Set(owner),
    };
    am.insert(conn).await
}

/// Write back a full note under its owner.
pub async fn persist<C: ConnectionTrait>(
    conn: &C,
    owner: UserId,
    note: Note,
) -> Result<Model, DbErr> {
    let am = ActiveModel {
        id: Set(note.id),
        title: Set(note.title),
        content: Set(note.content),
        created_at: Set(note.created_at),
        updated_at: Set(note.updated_at),
        user_id: Set(owner),
    };
    am.update(conn).await
}
