use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::contract::{User, UserId};
use crate::domain::ports::OwnedDataPurge;

/// A user row together with its stored password hash. The hash never
/// crosses the domain boundary outward.
#[derive(Debug, Clone)]
pub struct PasswordRecord {
    pub user: User,
    pub password_hash: String,
}

/// Fully-prepared user row; the service computes hash and timestamp,
/// the repository persists.
#[derive(Debug, Clone)]
pub struct NewUserRecord {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Port for the domain layer: persistence operations the identity service
/// needs. Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> anyhow::Result<Option<User>>;
    /// Lookup for authentication; includes the stored hash.
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<PasswordRecord>>;
    async fn email_exists(&self, email: &str) -> anyhow::Result<bool>;
    async fn username_exists(&self, username: &str) -> anyhow::Result<bool>;
    /// Insert and return the persisted user with its generated id.
    async fn insert(&self, rec: NewUserRecord) -> anyhow::Result<User>;
    /// Delete the user and all owned data in one transaction.
    /// Returns true if a user row was deleted.
    async fn delete_with_owned_data(
        &self,
        id: UserId,
        purge: &dyn OwnedDataPurge,
    ) -> anyhow::Result<bool>;
}
