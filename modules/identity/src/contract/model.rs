use chrono::{DateTime, Utc};

/// Stable numeric identity assigned to every registered user.
pub type UserId = i32;

/// Pure user model (no serde); the hashed password never appears here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Data for registering a new user. `password` is the raw secret; it is
/// hashed before anything is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Outcome of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
}
