mod common;

use anyhow::Result;
use axum::http::StatusCode;
use chrono::{Duration, Utc};
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;
use tower::ServiceExt;

use common::{bare_request, body_bytes, body_json, json_request, register_and_login, test_app};
use planner::infra::storage::{assignment, exam, note, timetable};

#[tokio::test]
async fn planner_routes_require_a_validated_identity() -> Result<()> {
    let (router, _db) = test_app().await;

    for uri in [
        "/timetable",
        "/assignments",
        "/assignments/upcoming",
        "/exams",
        "/notes",
    ] {
        let response = router.clone().oneshot(bare_request("GET", uri, None)).await?;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        let body = body_json(response).await;
        assert_eq!(body["error"], "authorization_required");
    }

    Ok(())
}

#[tokio::test]
async fn timetable_crud_and_by_day() -> Result<()> {
    let (router, _db) = test_app().await;
    let token = register_and_login(&router, "alice").await;

    // create two entries; insertion order must be preserved by list
    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/timetable",
            Some(&token),
            json!({
                "subject": "Maths",
                "day": "Monday",
                "start_time": "09:00",
                "end_time": "10:00",
                "room": "B12",
                "teacher": "Dr. Euler"
            }),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    let maths = body_json(response).await;
    assert_eq!(maths["subject"], "Maths");
    assert_eq!(maths["room"], "B12");

    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/timetable",
            Some(&token),
            json!({
                "subject": "History",
                "day": "Tuesday",
                "start_time": "11:00",
                "end_time": "12:00"
            }),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = router
        .clone()
        .oneshot(bare_request("GET", "/timetable", Some(&token)))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let list = body_json(response).await;
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["subject"], "Maths");
    assert_eq!(list[1]["subject"], "History");
    // optional fields are omitted when unset
    assert!(list[1].get("room").is_none());

    // by-day filter
    let response = router
        .clone()
        .oneshot(bare_request("GET", "/timetable/day/Monday", Some(&token)))
        .await?;
    let monday = body_json(response).await;
    assert_eq!(monday.as_array().unwrap().len(), 1);
    assert_eq!(monday[0]["subject"], "Maths");

    let response = router
        .clone()
        .oneshot(bare_request("GET", "/timetable/day/Friday", Some(&token)))
        .await?;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 0);

    // update, then delete
    let id = maths["id"].as_i64().unwrap();
    let response = router
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/timetable/{id}"),
            Some(&token),
            json!({"room": "C1"}),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["room"], "C1");
    assert_eq!(updated["subject"], "Maths");
    assert_eq!(updated["teacher"], "Dr. Euler");

    let response = router
        .clone()
        .oneshot(bare_request(
            "DELETE",
            &format!("/timetable/{id}"),
            Some(&token),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(response).await.is_empty());

    let response = router
        .clone()
        .oneshot(bare_request("GET", &format!("/timetable/{id}"), Some(&token)))
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Timetable entry not found.");

    Ok(())
}

#[tokio::test]
async fn timetable_input_shape_is_validated() -> Result<()> {
    let (router, _db) = test_app().await;
    let token = register_and_login(&router, "alice").await;

    // bad clock time
    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/timetable",
            Some(&token),
            json!({"subject": "Maths", "day": "Monday", "start_time": "9am", "end_time": "10:00"}),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"], "validation");

    // bad day token
    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/timetable",
            Some(&token),
            json!({"subject": "Maths", "day": "Moonday", "start_time": "09:00", "end_time": "10:00"}),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    Ok(())
}

#[tokio::test]
async fn assignment_deadline_scenario() -> Result<()> {
    let (router, _db) = test_app().await;
    let token = register_and_login(&router, "alice").await;

    let due = (Utc::now() + Duration::days(3)).to_rfc3339();
    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/assignments",
            Some(&token),
            json!({"title": "Essay", "subject": "History", "due_date": due}),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();
    // defaults applied server-side
    assert_eq!(created["status"], "pending");
    assert_eq!(created["priority"], "medium");

    // upcoming contains it, overdue is empty
    let response = router
        .clone()
        .oneshot(bare_request("GET", "/assignments/upcoming", Some(&token)))
        .await?;
    let upcoming = body_json(response).await;
    assert_eq!(upcoming.as_array().unwrap().len(), 1);
    assert_eq!(upcoming[0]["title"], "Essay");

    let response = router
        .clone()
        .oneshot(bare_request("GET", "/assignments/overdue", Some(&token)))
        .await?;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 0);

    // complete it; upcoming empties even though the deadline is in range
    let response = router
        .clone()
        .oneshot(bare_request(
            "PATCH",
            &format!("/assignments/{id}/complete"),
            Some(&token),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let completed = body_json(response).await;
    assert_eq!(completed["status"], "completed");

    let response = router
        .clone()
        .oneshot(bare_request("GET", "/assignments/upcoming", Some(&token)))
        .await?;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 0);

    // by-status reflects the transition
    let response = router
        .clone()
        .oneshot(bare_request(
            "GET",
            "/assignments/status/completed",
            Some(&token),
        ))
        .await?;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);

    let response = router
        .clone()
        .oneshot(bare_request(
            "GET",
            "/assignments/status/pending",
            Some(&token),
        ))
        .await?;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 0);

    // a token outside the closed status set is a validation error
    let response = router
        .clone()
        .oneshot(bare_request(
            "GET",
            "/assignments/status/archived",
            Some(&token),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    Ok(())
}

#[tokio::test]
async fn assignment_list_sorted_by_due_date() -> Result<()> {
    let (router, _db) = test_app().await;
    let token = register_and_login(&router, "alice").await;

    for (title, days) in [("Later", 9), ("Soonest", 1), ("Middle", 5)] {
        let due = (Utc::now() + Duration::days(days)).to_rfc3339();
        let response = router
            .clone()
            .oneshot(json_request(
                "POST",
                "/assignments",
                Some(&token),
                json!({"title": title, "subject": "Any", "due_date": due}),
            ))
            .await?;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = router
        .clone()
        .oneshot(bare_request("GET", "/assignments", Some(&token)))
        .await?;
    let list = body_json(response).await;
    let titles: Vec<_> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, ["Soonest", "Middle", "Later"]);

    Ok(())
}

#[tokio::test]
async fn assignment_partial_update_skips_null() -> Result<()> {
    let (router, _db) = test_app().await;
    let token = register_and_login(&router, "alice").await;

    let due = (Utc::now() + Duration::days(2)).to_rfc3339();
    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/assignments",
            Some(&token),
            json!({
                "title": "Essay",
                "subject": "History",
                "description": "Five pages",
                "due_date": due,
                "priority": "high"
            }),
        ))
        .await?;
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();

    // explicit nulls are skipped; only supplied values change
    let response = router
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/assignments/{id}"),
            Some(&token),
            json!({"status": null, "priority": null, "title": "Long essay"}),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["title"], "Long essay");
    assert_eq!(updated["status"], "pending");
    assert_eq!(updated["priority"], "high");
    assert_eq!(updated["description"], "Five pages");
    assert_eq!(updated["due_date"], created["due_date"]);
    assert_eq!(updated["created_at"], created["created_at"]);

    Ok(())
}

#[tokio::test]
async fn note_partial_update_uses_presence_semantics() -> Result<()> {
    let (router, _db) = test_app().await;
    let token = register_and_login(&router, "alice").await;

    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/notes",
            Some(&token),
            json!({"title": "Groceries", "content": "milk, eggs"}),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();

    // explicit null on a non-nullable field is rejected, nothing changes
    let response = router
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/notes/{id}"),
            Some(&token),
            json!({"content": null}),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"], "validation");
    assert_eq!(body["message"], "content: may not be null");

    let response = router
        .clone()
        .oneshot(bare_request("GET", &format!("/notes/{id}"), Some(&token)))
        .await?;
    let unchanged = body_json(response).await;
    assert_eq!(unchanged["content"], "milk, eggs");
    assert_eq!(unchanged["updated_at"], created["updated_at"]);

    // a present key overwrites; the other field is kept and updated_at moves
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    let response = router
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/notes/{id}"),
            Some(&token),
            json!({"title": "Shopping"}),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["title"], "Shopping");
    assert_eq!(updated["content"], "milk, eggs");
    assert_eq!(updated["created_at"], created["created_at"]);
    assert_ne!(updated["updated_at"], created["updated_at"]);

    Ok(())
}

#[tokio::test]
async fn notes_list_newest_first() -> Result<()> {
    let (router, _db) = test_app().await;
    let token = register_and_login(&router, "alice").await;

    for title in ["first", "second", "third"] {
        let response = router
            .clone()
            .oneshot(json_request(
                "POST",
                "/notes",
                Some(&token),
                json!({"title": title, "content": "x"}),
            ))
            .await?;
        assert_eq!(response.status(), StatusCode::CREATED);
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let response = router
        .clone()
        .oneshot(bare_request("GET", "/notes", Some(&token)))
        .await?;
    let list = body_json(response).await;
    let titles: Vec<_> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, ["third", "second", "first"]);

    Ok(())
}

#[tokio::test]
async fn exam_round_trip_and_derived_queries() -> Result<()> {
    let (router, _db) = test_app().await;
    let token = register_and_login(&router, "alice").await;

    let soon = (Utc::now() + Duration::days(2)).to_rfc3339();
    let later = (Utc::now() + Duration::days(10)).to_rfc3339();

    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/exams",
            Some(&token),
            json!({
                "subject": "Physics",
                "exam_type": "midterm",
                "exam_date": soon,
                "room": "A1",
                "notes": "bring calculator"
            }),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();

    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/exams",
            Some(&token),
            json!({"subject": "Chemistry", "exam_type": "final", "exam_date": later}),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);

    // round-trip: get returns the created field values
    let response = router
        .clone()
        .oneshot(bare_request("GET", &format!("/exams/{id}"), Some(&token)))
        .await?;
    let fetched = body_json(response).await;
    assert_eq!(fetched["subject"], "Physics");
    assert_eq!(fetched["exam_type"], "midterm");
    assert_eq!(fetched["room"], "A1");
    assert_eq!(fetched["notes"], "bring calculator");
    assert_eq!(fetched["exam_date"], created["exam_date"]);

    // only the exam inside the seven-day window is upcoming
    let response = router
        .clone()
        .oneshot(bare_request("GET", "/exams/upcoming", Some(&token)))
        .await?;
    let upcoming = body_json(response).await;
    assert_eq!(upcoming.as_array().unwrap().len(), 1);
    assert_eq!(upcoming[0]["subject"], "Physics");

    // by-type equality filter
    let response = router
        .clone()
        .oneshot(bare_request("GET", "/exams/type/final", Some(&token)))
        .await?;
    let finals = body_json(response).await;
    assert_eq!(finals.as_array().unwrap().len(), 1);
    assert_eq!(finals[0]["subject"], "Chemistry");

    let response = router
        .clone()
        .oneshot(bare_request("GET", "/exams/type/quiz", Some(&token)))
        .await?;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 0);

    Ok(())
}

#[tokio::test]
async fn foreign_owner_is_indistinguishable_from_missing() -> Result<()> {
    let (router, _db) = test_app().await;
    let alice = register_and_login(&router, "alice").await;
    let mallory = register_and_login(&router, "mallory").await;

    let due = (Utc::now() + Duration::days(1)).to_rfc3339();
    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/assignments",
            Some(&alice),
            json!({"title": "Private", "subject": "Secrets", "due_date": due}),
        ))
        .await?;
    let id = body_json(response).await["id"].as_i64().unwrap();

    let missing_id = id + 1000;
    for (method, uri, body) in [
        ("GET", format!("/assignments/{id}"), None),
        (
            "PUT",
            format!("/assignments/{id}"),
            Some(json!({"title": "Hijacked"})),
        ),
        ("DELETE", format!("/assignments/{id}"), None),
    ] {
        let request = match body {
            Some(b) => json_request(method, &uri, Some(&mallory), b),
            None => bare_request(method, &uri, Some(&mallory)),
        };
        let response = router.clone().oneshot(request).await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{method} {uri}");
        let body = body_json(response).await;
        assert_eq!(body["message"], "Assignment not found.");

        // identical signal for a genuinely nonexistent id
        let request = bare_request("GET", &format!("/assignments/{missing_id}"), Some(&mallory));
        let response = router.clone().oneshot(request).await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    // the entity survived and lists stay owner-scoped
    let response = router
        .clone()
        .oneshot(bare_request("GET", "/assignments", Some(&alice)))
        .await?;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);

    let response = router
        .clone()
        .oneshot(bare_request("GET", "/assignments", Some(&mallory)))
        .await?;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 0);

    Ok(())
}

#[tokio::test]
async fn owner_is_forced_server_side() -> Result<()> {
    let (router, _db) = test_app().await;
    let alice = register_and_login(&router, "alice").await;
    let mallory = register_and_login(&router, "mallory").await;

    // a user_id smuggled into the payload is ignored
    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/notes",
            Some(&mallory),
            json!({"title": "Planted", "content": "x", "user_id": 1}),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["id"].as_i64().unwrap();

    // the row belongs to mallory, not to user 1
    let response = router
        .clone()
        .oneshot(bare_request("GET", &format!("/notes/{id}"), Some(&mallory)))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .clone()
        .oneshot(bare_request("GET", &format!("/notes/{id}"), Some(&alice)))
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn account_deletion_purges_owned_collections() -> Result<()> {
    let (router, db) = test_app().await;
    let alice = register_and_login(&router, "alice").await;
    let bob = register_and_login(&router, "bob").await;

    let due = (Utc::now() + Duration::days(1)).to_rfc3339();
    for (token, suffix) in [(&alice, "a"), (&bob, "b")] {
        let requests = [
            (
                "/timetable",
                json!({"subject": format!("Sub {suffix}"), "day": "Monday", "start_time": "09:00", "end_time": "10:00"}),
            ),
            (
                "/assignments",
                json!({"title": format!("T {suffix}"), "subject": "S", "due_date": due}),
            ),
            (
                "/exams",
                json!({"subject": format!("E {suffix}"), "exam_type": "quiz", "exam_date": due}),
            ),
            (
                "/notes",
                json!({"title": format!("N {suffix}"), "content": "c"}),
            ),
        ];
        for (uri, body) in requests {
            let response = router
                .clone()
                .oneshot(json_request("POST", uri, Some(token), body))
                .await?;
            assert_eq!(response.status(), StatusCode::CREATED);
        }
    }

    let response = router
        .clone()
        .oneshot(bare_request("DELETE", "/me", Some(&alice)))
        .await?;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // exactly bob's rows remain in each collection
    assert_eq!(timetable::Entity::find().count(&db).await?, 1);
    assert_eq!(assignment::Entity::find().count(&db).await?, 1);
    assert_eq!(exam::Entity::find().count(&db).await?, 1);
    assert_eq!(note::Entity::find().count(&db).await?, 1);

    let response = router
        .clone()
        .oneshot(bare_request("GET", "/notes", Some(&bob)))
        .await?;
    let bobs = body_json(response).await;
    assert_eq!(bobs.as_array().unwrap().len(), 1);
    assert_eq!(bobs[0]["title"], "N b");

    Ok(())
}
