use axum::{
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// Build the identity router. The caller is responsible for layering the
/// shared `Arc<SessionSigner>` extension used by the auth extractors.
pub fn router(service: Arc<Service>) -> Router {
    Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/refresh", post(handlers::refresh))
        .route("/me", get(handlers::me).delete(handlers::delete_me))
        .layer(Extension(service))
}
