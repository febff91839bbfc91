pub mod model;

pub use model::{NewUser, Session, User, UserId};
