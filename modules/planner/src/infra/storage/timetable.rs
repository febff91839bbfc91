use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, NotSet, QueryOrder, Set};

use crate::contract::{NewTimetableEntry, TimetableEntry, UserId};
use crate::infra::storage::{select_owned, OwnedEntity};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "timetable_entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub subject: String,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    pub room: Option<String>,
    pub teacher: Option<String>,
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

impl From<Model> for TimetableEntry {
    fn from(m: Model) -> Self {
        TimetableEntry {
            id: m.id,
            subject: m.subject,
            day: m.day,
            start_time: m.start_time,
            end_time: m.end_time,
            room: m.room,
            teacher: m.teacher,
        }
    }
}

/// All entries for the owner, in insertion order.
pub async fn list<C: ConnectionTrait>(conn: &C, owner: UserId) -> Result<Vec<Model>, DbErr> {
    select_owned::<Entity>(owner)
        .order_by_asc(Column::Id)
        .all(conn)
        .await
}

pub async fn list_by_day<C: ConnectionTrait>(
    conn: &C,
    owner: UserId,
    day: &str,
) -> Result<Vec<Model>, DbErr> {
    select_owned::<Entity>(owner)
        .filter(Column::Day.eq(day))
        .order_by_asc(Column::Id)
        .all(conn)
        .await
}

pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    owner: UserId,
    new: NewTimetableEntry,
) -> Result<Model, DbErr> {
    let am = ActiveModel {
        id: NotSet,
        subject: Set(new.subject),
        day: Set(new.day),
        start_time: Set(new.start_time),
        end_time: Set(new.end_time),
        room: Set(new.room),
        teacher: Set(new.teacher),
        user_id: Set(owner),
    };
    am.insert(conn).await
}

/// Write back a full entry under its owner.
pub async fn persist<C: ConnectionTrait>(
    conn: &C,
    owner: UserId,
    entry: TimetableEntry,
) -> Result<Model, DbErr> {
    let am = ActiveModel {
        id: Set(entry.id),
        subject: Set(entry.subject),
        day: Set(entry.day),
        start_time: Set(entry.start_time),
        end_time: Set(entry.end_time),
        room: Set(entry.room),
        teacher: Set(entry.teacher),
        user_id: Set(owner),
    };
    am.update(conn).await
}
