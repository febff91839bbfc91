use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, NotSet, QueryOrder, Set};

use crate::contract::{Exam, NewExam, UserId};
use crate::infra::storage::{select_owned, OwnedEntity};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "exams")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub subject: String,
    pub exam_type: String,
    pub exam_date: DateTime<Utc>,
    pub room: Option<String>,
    pub notes: Option<String>,
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

impl From<Model> for Exam {
    fn from(m: Model) -> Self {
        Exam {
            id: m.id,
            subject: m.subject,
            exam_type: m.exam_type,
            exam_date: m.exam_date,
            room: m.room,
            notes: m.notes,
            created_at: m.created_at,
        }
    }
}

/// All exams for the owner, earliest date first.
pub async fn list<C: ConnectionTrait>(conn: &C, owner: UserId) -> Result<Vec<Model>, DbErr> {
    select_owned::<Entity>(owner)
        .order_by_asc(Column::ExamDate)
        .all(conn)
        .await
}

pub async fn list_by_type<C: ConnectionTrait>(
    conn: &C,
    owner: UserId,
    exam_type: &str,
) -> Result<Vec<Model>, DbErr> {
    select_owned::<Entity>(owner)
        .filter(Column::ExamType.eq(exam_type))
        .order_by_asc(Column::Id)
        .all(conn)
        .await
}

/// Exams scheduled inside `[from, to]` (both ends inclusive),
/// earliest first.
pub async fn list_between<C: ConnectionTrait>(
    conn: &C,
    owner: UserId,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<Vec<Model>, DbErr> {
    select_owned::<Entity>(owner)
        .filter(Column::ExamDate.between(from, to))
        .order_by_asc(Column::ExamDate)
        .all(conn)
        .await
}

pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    owner: UserId,
    new: NewExam,
    created_at: DateTime<Utc>,
) -> Result<Model, DbErr> {
    let am = ActiveModel {
        id: NotSet,
        subject: Set(new.subject),
        exam_type: Set(new.exam_type),
        exam_date: Set(new.exam_date),
        room: Set(new.room),
        notes: Set(new.notes),
        created_at: Set(created_at),
        user_id: Set(owner),
    };
    am.insert(conn).await
}

/// Write back a full exam under its owner.
pub async fn persist<C: ConnectionTrait>(
    conn: &C,
    owner: UserId,
    exam: Exam,
) -> Result<Model, DbErr> {
    let am = ActiveModel {
        id: Set(exam.id),
        subject: Set(exam.subject),
        exam_type: Set(exam.exam_type),
        exam_date: Set(exam.exam_date),
        room: Set(exam.room),
        notes: Set(exam.notes),
        created_at: Set(exam.created_at),
        user_id: Set(owner),
    };
    am.update(conn).await
}
