use sea_orm_migration::prelude::*;

use crate::m20250801_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Owner FKs are RESTRICT: account deletion purges owned rows
        // explicitly inside one transaction, the constraint only backstops it.
        manager
            .create_table(
                Table::create()
                    .table(TimetableEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TimetableEntries::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TimetableEntries::Subject)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TimetableEntries::Day)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TimetableEntries::StartTime)
                            .string_len(10)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TimetableEntries::EndTime)
                            .string_len(10)
                            .not_null(),
                    )
                    .col(ColumnDef::new(TimetableEntries::Room).string_len(50))
                    .col(ColumnDef::new(TimetableEntries::Teacher).string_len(100))
                    .col(
                        ColumnDef::new(TimetableEntries::UserId)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_timetable_entries_user")
                            .from(TimetableEntries::Table, TimetableEntries::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_timetable_entries_user_id")
                    .table(TimetableEntries::Table)
                    .col(TimetableEntries::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Assignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assignments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Assignments::Title).string_len(200).not_null())
                    .col(
                        ColumnDef::new(Assignments::Subject)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Assignments::Description).text())
                    .col(
                        ColumnDef::new(Assignments::DueDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Assignments::Status).string_len(20).not_null())
                    .col(
                        ColumnDef::new(Assignments::Priority)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Assignments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Assignments::UserId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assignments_user")
                            .from(Assignments::Table, Assignments::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_assignments_user_id")
                    .table(Assignments::Table)
                    .col(Assignments::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Exams::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Exams::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Exams::Subject).string_len(100).not_null())
                    .col(ColumnDef::new(Exams::ExamType).string_len(50).not_null())
                    .col(
                        ColumnDef::new(Exams::ExamDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Exams::Room).string_len(50))
                    .col(ColumnDef::new(Exams::Notes).text())
                    .col(
                        ColumnDef::new(Exams::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Exams::UserId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_exams_user")
                            .from(Exams::Table, Exams::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_exams_user_id")
                    .table(Exams::Table)
                    .col(Exams::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Notes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Notes::Title).string_len(100).not_null())
                    .col(ColumnDef::new(Notes::Content).text().not_null())
                    .col(
                        ColumnDef::new(Notes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Notes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Notes::UserId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_notes_user")
                            .from(Notes::Table, Notes::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_notes_user_id")
                    .table(Notes::Table)
                    .col(Notes::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Notes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Exams::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assignments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TimetableEntries::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum TimetableEntries {
    Table,
    Id,
    Subject,
    Day,
    StartTime,
    EndTime,
    Room,
    Teacher,
    UserId,
}

#[derive(DeriveIden)]
enum Assignments {
    Table,
    Id,
    Title,
    Subject,
    Description,
    DueDate,
    Status,
    Priority,
    CreatedAt,
    UserId,
}

#[derive(DeriveIden)]
enum Exams {
    Table,
    Id,
    Subject,
    ExamType,
    ExamDate,
    Room,
    Notes,
    CreatedAt,
    UserId,
}

#[derive(DeriveIden)]
enum Notes {
    Table,
    Id,
    Title,
    Content,
    CreatedAt,
    UpdatedAt,
    UserId,
}
