#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Extension, Router,
};
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use serde_json::Value;

use identity::infra::storage::SeaOrmUsersRepository;
use identity::security::SessionSigner;
use migration::Migrator;
use planner::PlannerDataPurge;

pub async fn setup_db() -> DatabaseConnection {
    // A pooled in-memory SQLite database is one database per connection.
    let mut opts = sea_orm::ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1);
    let db = Database::connect(opts)
        .await
        .expect("Failed to connect to test database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

/// Compose the full application router the way the server binary does:
/// identity + planner routes sharing one session signer.
pub async fn test_app() -> (Router, DatabaseConnection) {
    let db = setup_db().await;

    let signer = Arc::new(SessionSigner::new(
        "planner-test-secret",
        Duration::from_secs(900),
        Duration::from_secs(3600),
    ));

    let users_repo = Arc::new(SeaOrmUsersRepository::new(db.clone()));
    let identity_svc = Arc::new(identity::Service::new(
        users_repo,
        signer.clone(),
        Arc::new(PlannerDataPurge),
        identity::ServiceConfig::default(),
    ));
    let planner_svc = Arc::new(planner::Service::new(
        db.clone(),
        planner::ServiceConfig::default(),
    ));

    let router = Router::new()
        .merge(identity::api::rest::routes::router(identity_svc))
        .merge(planner::api::rest::routes::router(planner_svc))
        .layer(Extension(signer));

    (router, db)
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn bare_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap()
}

/// Register a user and return an access token for them.
pub async fn register_and_login(router: &Router, username: &str) -> String {
    use tower::ServiceExt;

    let email = format!("{username}@example.com");
    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/register",
            None,
            serde_json::json!({"username": username, "email": email, "password": "pw-123"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/login",
            None,
            serde_json::json!({"email": email, "password": "pw-123"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    body["access_token"].as_str().unwrap().to_string()
}
