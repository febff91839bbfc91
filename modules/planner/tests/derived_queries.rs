//! Storage-level checks for the temporal predicates: the upcoming window is
//! inclusive at both ends, overdue is strictly before the cutoff, and
//! completed assignments never appear in either.

mod common;

use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use sea_orm::DatabaseConnection;

use common::setup_db;
use identity::domain::repo::{NewUserRecord, UsersRepository};
use identity::infra::storage::SeaOrmUsersRepository;
use planner::contract::{AssignmentStatus, NewAssignment, NewExam, Priority};
use planner::infra::storage::{assignment, exam};

async fn seed_user(db: &DatabaseConnection) -> i32 {
    let repo = Arc::new(SeaOrmUsersRepository::new(db.clone()));
    let user = repo
        .insert(NewUserRecord {
            username: "owner".to_string(),
            email: "owner@example.com".to_string(),
            password_hash: "x".to_string(),
            created_at: Utc::now(),
        })
        .await
        .expect("seed user");
    user.id
}

fn new_assignment(title: &str, due: DateTime<Utc>, status: AssignmentStatus) -> NewAssignment {
    NewAssignment {
        title: title.to_string(),
        subject: "S".to_string(),
        description: None,
        due_date: due,
        status,
        priority: Priority::Medium,
    }
}

#[tokio::test]
async fn upcoming_window_is_inclusive_both_ends() -> Result<()> {
    let db = setup_db().await;
    let owner = seed_user(&db).await;

    let now = Utc::now();
    let week = now + Duration::days(7);

    let cases = [
        ("at-now", now, AssignmentStatus::Pending),
        ("inside", now + Duration::days(3), AssignmentStatus::Pending),
        ("at-boundary", week, AssignmentStatus::Pending),
        (
            "just-outside",
            week + Duration::seconds(1),
            AssignmentStatus::Pending,
        ),
        (
            "just-before",
            now - Duration::seconds(1),
            AssignmentStatus::Pending,
        ),
        (
            "completed-inside",
            now + Duration::days(2),
            AssignmentStatus::Completed,
        ),
    ];
    for (title, due, status) in cases {
        assignment::insert(&db, owner, new_assignment(title, due, status), now).await?;
    }

    let rows = assignment::list_due_between(&db, owner, now, week).await?;
    let titles: Vec<_> = rows.iter().map(|m| m.title.as_str()).collect();
    // both boundary values are included, sorted by due date ascending
    assert_eq!(titles, ["at-now", "inside", "at-boundary"]);

    Ok(())
}

#[tokio::test]
async fn overdue_is_strictly_past_and_open() -> Result<()> {
    let db = setup_db().await;
    let owner = seed_user(&db).await;

    let now = Utc::now();

    let cases = [
        (
            "oldest",
            now - Duration::days(5),
            AssignmentStatus::Pending,
        ),
        ("old", now - Duration::days(1), AssignmentStatus::Pending),
        (
            "done-late",
            now - Duration::days(2),
            AssignmentStatus::Completed,
        ),
        ("exactly-now", now, AssignmentStatus::Pending),
        (
            "future",
            now + Duration::days(1),
            AssignmentStatus::Pending,
        ),
    ];
    for (title, due, status) in cases {
        assignment::insert(&db, owner, new_assignment(title, due, status), now).await?;
    }

    let rows = assignment::list_overdue(&db, owner, now).await?;
    let titles: Vec<_> = rows.iter().map(|m| m.title.as_str()).collect();
    // due_date == now is not overdue; completed is excluded
    assert_eq!(titles, ["oldest", "old"]);

    Ok(())
}

#[tokio::test]
async fn windows_are_owner_scoped() -> Result<()> {
    let db = setup_db().await;
    let owner = seed_user(&db).await;

    let repo = Arc::new(SeaOrmUsersRepository::new(db.clone()));
    let other = repo
        .insert(NewUserRecord {
            username: "other".to_string(),
            email: "other@example.com".to_string(),
            password_hash: "x".to_string(),
            created_at: Utc::now(),
        })
        .await?
        .id;

    let now = Utc::now();
    let due = now + Duration::days(3);
    assignment::insert(
        &db,
        owner,
        new_assignment("mine", due, AssignmentStatus::Pending),
        now,
    )
    .await?;
    assignment::insert(
        &db,
        other,
        new_assignment("theirs", due, AssignmentStatus::Pending),
        now,
    )
    .await?;

    let rows = assignment::list_due_between(&db, owner, now, now + Duration::days(7)).await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "mine");

    Ok(())
}

#[tokio::test]
async fn exam_window_is_inclusive_and_sorted() -> Result<()> {
    let db = setup_db().await;
    let owner = seed_user(&db).await;

    let now = Utc::now();
    let week = now + Duration::days(7);

    let cases = [
        ("late", week),
        ("early", now),
        ("mid", now + Duration::days(4)),
        ("outside", week + Duration::seconds(1)),
    ];
    for (subject, date) in cases {
        exam::insert(
            &db,
            owner,
            NewExam {
                subject: subject.to_string(),
                exam_type: "quiz".to_string(),
                exam_date: date,
                room: None,
                notes: None,
            },
            now,
        )
        .await?;
    }

    let rows = exam::list_between(&db, owner, now, week).await?;
    let subjects: Vec<_> = rows.iter().map(|m| m.subject.as_str()).collect();
    assert_eq!(subjects, ["early", "mid", "late"]);

    Ok(())
}
