//! Planner module: the four owned resource stores (timetable, assignments,
//! exams, notes) with CRUD, derived queries and partial-update merging, all
//! scoped to the authenticated owner.

pub mod api;
pub mod contract;
pub mod domain;
pub mod infra;

pub use domain::service::{Service, ServiceConfig};
pub use infra::PlannerDataPurge;
