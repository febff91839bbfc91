//! Identity module: user registration, authentication, session tokens and
//! the access-scoping extractors used by every protected route.

pub mod api;
pub mod contract;
pub mod domain;
pub mod infra;
pub mod security;

pub use domain::service::{Service, ServiceConfig};
