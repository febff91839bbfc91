use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, NotSet, QueryOrder, Set};

use crate::contract::model::UnknownToken;
use crate::contract::{Assignment, AssignmentStatus, NewAssignment, Priority, UserId};
use crate::infra::storage::{select_owned, OwnedEntity};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub subject: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub status: String,
    pub priority: String,
    pub created_at: DateTime<Utc>,
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

impl TryFrom<Model> for Assignment {
    type Error = UnknownToken;

    fn try_from(m: Model) -> Result<Self, Self::Error> {
        Ok(Assignment {
            id: m.id,
            title: m.title,
            subject: m.subject,
            description: m.description,
            due_date: m.due_date,
            status: m.status.parse::<AssignmentStatus>()?,
            priority: m.priority.parse::<Priority>()?,
            created_at: m.created_at,
        })
    }
}

/// All assignments for the owner, earliest deadline first.
pub async fn list<C: ConnectionTrait>(conn: &C, owner: UserId) -> Result<Vec<Model>, DbErr> {
    select_owned::<Entity>(owner)
        .order_by_asc(Column::DueDate)
        .all(conn)
        .await
}

pub async fn list_by_status<C: ConnectionTrait>(
    conn: &C,
    owner: UserId,
    status: &str,
) -> Result<Vec<Model>, DbErr> {
    select_owned::<Entity>(owner)
        .filter(Column::Status.eq(status))
        .order_by_asc(Column::Id)
        .all(conn)
        .await
}

/// Open assignments due inside `[from, to]` (both ends inclusive),
/// earliest deadline first.
pub async fn list_due_between<C: ConnectionTrait>(
    conn: &C,
    owner: UserId,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<Vec<Model>, DbErr> {
    select_owned::<Entity>(owner)
        .filter(Column::DueDate.between(from, to))
        .filter(Column::Status.ne(AssignmentStatus::Completed.as_str()))
        .order_by_asc(Column::DueDate)
        .all(conn)
        .await
}

/// Open assignments already past their deadline, earliest first.
pub async fn list_overdue<C: ConnectionTrait>(
    conn: &C,
    owner: UserId,
    as_of: DateTime<Utc>,
) -> Result<Vec<Model>, DbErr> {
    select_owned::<Entity>(owner)
        .filter(Column::DueDate.lt(as_of))
        .filter(Column::Status.ne(AssignmentStatus::Completed.as_str()))
        .order_by_asc(Column::DueDate)
        .all(conn)
        .await
}

pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    owner: UserId,
    new: NewAssignment,
    created_at: DateTime<Utc>,
) -> Result<Model, DbErr> {
    let am = ActiveModel {
        id: NotSet,
        title: Set(new.title),
        subject: Set(new.subject),
        description: Set(new.description),
        due_date: Set(new.due_date),
        status: Set(new.status.as_str().to_string()),
        priority: Set(new.priority.as_str().to_string()),
        created_at: Set(created_at),
        user_id: Set(owner),
    };
    am.insert(conn).await
}

/// Write back a full assignment under its owner.
pub async fn persist<C: ConnectionTrait>(
    conn: &C,
    owner: UserId,
    a: Assignment,
) -> Result<Model, DbErr> {
    let am = ActiveModel {
        id: Set(a.id),
        title: Set(a.title),
        subject: Set(a.subject),
        description: Set(a.description),
        due_date: Set(a.due_date),
        status: Set(a.status.as_str().to_string()),
        priority: Set(a.priority.as_str().to_string()),
        created_at: Set(a.created_at),
        user_id: Set(owner),
    };
    am.update(conn).await
}
