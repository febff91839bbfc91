use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};

use crate::contract::{NewUser, Session, User, UserId};
use crate::domain::error::IdentityError;
use crate::domain::ports::OwnedDataPurge;
use crate::domain::repo::{NewUserRecord, UsersRepository};
use crate::security::password;
use crate::security::SessionSigner;

/// Domain service for registration, authentication and session issuance.
/// Depends only on the repository and purge ports, not on infra types.
pub struct Service {
    repo: Arc<dyn UsersRepository>,
    sessions: Arc<SessionSigner>,
    purge: Arc<dyn OwnedDataPurge>,
    config: ServiceConfig,
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub max_username_length: usize,
    pub max_email_length: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_username_length: 80,
            max_email_length: 120,
        }
    }
}

impl Service {
    pub fn new(
        repo: Arc<dyn UsersRepository>,
        sessions: Arc<SessionSigner>,
        purge: Arc<dyn OwnedDataPurge>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            repo,
            sessions,
            purge,
            config,
        }
    }

    /// Register a new account. The email uniqueness check runs before the
    /// username check, so a request taking both surfaces the email conflict.
    /// Registration does not log the user in.
    #[instrument(
        name = "identity.service.register",
        skip(self, new_user),
        fields(username = %new_user.username, email = %new_user.email)
    )]
    pub async fn register(&self, new_user: NewUser) -> Result<(), IdentityError> {
        info!("Registering new user");

        self.validate_new_user(&new_user)?;

        if self
            .repo
            .email_exists(&new_user.email)
            .await
            .map_err(|e| IdentityError::internal(e.to_string()))?
        {
            return Err(IdentityError::EmailTaken);
        }

        if self
            .repo
            .username_exists(&new_user.username)
            .await
            .map_err(|e| IdentityError::internal(e.to_string()))?
        {
            return Err(IdentityError::UsernameTaken);
        }

        let password_hash = password::hash_password(&new_user.password)
            .map_err(|e| IdentityError::internal(format!("password hashing failed: {e}")))?;

        let user = self
            .repo
            .insert(NewUserRecord {
                username: new_user.username,
                email: new_user.email,
                password_hash,
                created_at: Utc::now(),
            })
            .await
            .map_err(|e| IdentityError::internal(e.to_string()))?;

        info!("Registered user with id={}", user.id);
        Ok(())
    }

    /// Authenticate by email and password, minting a fresh access token and
    /// a refresh token. An unknown email and a wrong password are
    /// indistinguishable to the caller.
    #[instrument(name = "identity.service.login", skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, IdentityError> {
        debug!("Authenticating user");

        let record = self
            .repo
            .find_by_email(email)
            .await
            .map_err(|e| IdentityError::internal(e.to_string()))?
            .ok_or(IdentityError::InvalidCredentials)?;

        if !password::verify_password(password, &record.password_hash) {
            return Err(IdentityError::InvalidCredentials);
        }

        let access_token = self.sessions.issue_access(record.user.id, true)?;
        let refresh_token = self.sessions.issue_refresh(record.user.id)?;

        info!("User {} logged in", record.user.id);
        Ok(Session {
            access_token,
            refresh_token,
            user: record.user,
        })
    }

    /// Mint a new access token from an already-validated refresh session.
    /// The new token is not marked fresh.
    #[instrument(name = "identity.service.refresh", skip(self), fields(user_id = user))]
    pub async fn refresh(&self, user: UserId) -> Result<String, IdentityError> {
        self.sessions.issue_access(user, false)
    }

    #[instrument(name = "identity.service.profile", skip(self), fields(user_id = id))]
    pub async fn profile(&self, id: UserId) -> Result<User, IdentityError> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(|e| IdentityError::internal(e.to_string()))?
            .ok_or(IdentityError::UserNotFound)
    }

    /// Delete the account and everything it owns, in one transaction.
    #[instrument(name = "identity.service.delete_account", skip(self), fields(user_id = id))]
    pub async fn delete_account(&self, id: UserId) -> Result<(), IdentityError> {
        info!("Deleting account");

        let deleted = self
            .repo
            .delete_with_owned_data(id, self.purge.as_ref())
            .await
            .map_err(|e| IdentityError::internal(e.to_string()))?;

        if !deleted {
            return Err(IdentityError::UserNotFound);
        }

        info!("Deleted account and owned data");
        Ok(())
    }

    // --- validation helpers ---

    fn validate_new_user(&self, new_user: &NewUser) -> Result<(), IdentityError> {
        if new_user.username.trim().is_empty() {
            return Err(IdentityError::validation("username", "must not be empty"));
        }
        if new_user.username.len() > self.config.max_username_length {
            return Err(IdentityError::validation(
                "username",
                format!(
                    "must be at most {} characters",
                    self.config.max_username_length
                ),
            ));
        }
        self.validate_email(&new_user.email)?;
        if new_user.password.is_empty() {
            return Err(IdentityError::validation("password", "must not be empty"));
        }
        Ok(())
    }

    fn validate_email(&self, email: &str) -> Result<(), IdentityError> {
        if email.is_empty() || !email.contains('@') || !email.contains('.') {
            return Err(IdentityError::validation(
                "email",
                "must look like an email address",
            ));
        }
        if email.len() > self.config.max_email_length {
            return Err(IdentityError::validation(
                "email",
                format!("must be at most {} characters", self.config.max_email_length),
            ));
        }
        Ok(())
    }
}
