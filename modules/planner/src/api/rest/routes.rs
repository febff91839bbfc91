use axum::{
    routing::{get, patch},
    Extension, Router,
};
use std::sync::Arc;

use crate::api::rest::handlers::{assignment, exam, note, timetable};
use crate::domain::service::Service;

/// Build the planner router. Every route requires a validated access token
/// via the `AuthUser` extractor; the caller layers the shared
/// `Arc<SessionSigner>` extension those extractors read.
pub fn router(service: Arc<Service>) -> Router {
    Router::new()
        .route("/timetable", get(timetable::list).post(timetable::create))
        .route("/timetable/day/{day}", get(timetable::by_day))
        .route(
            "/timetable/{id}",
            get(timetable::get)
                .put(timetable::update)
                .delete(timetable::delete),
        )
        .route("/assignments", get(assignment::list).post(assignment::create))
        .route("/assignments/upcoming", get(assignment::upcoming))
        .route("/assignments/overdue", get(assignment::overdue))
        .route("/assignments/status/{status}", get(assignment::by_status))
        .route(
            "/assignments/{id}",
            get(assignment::get)
                .put(assignment::update)
                .delete(assignment::delete),
        )
        .route("/assignments/{id}/complete", patch(assignment::complete))
        .route("/exams", get(exam::list).post(exam::create))
        .route("/exams/upcoming", get(exam::upcoming))
        .route("/exams/type/{exam_type}", get(exam::by_type))
        .route(
            "/exams/{id}",
            get(exam::get).put(exam::update).delete(exam::delete),
        )
        .route("/notes", get(note::list).post(note::create))
        .route(
            "/notes/{id}",
            get(note::get).put(note::update).delete(note::delete),
        )
        .layer(Extension(service))
}
