//! Session token issuance and validation (JWT, HS256).
//!
//! Two token kinds are minted: short-lived access tokens (marked `fresh`
//! only when issued at login) and longer-lived refresh tokens, usable solely
//! to mint new access tokens.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::contract::UserId;
use crate::domain::error::IdentityError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id, stringified.
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    #[serde(rename = "type")]
    pub kind: TokenKind,
    pub fresh: bool,
}

/// A successfully validated token, reduced to what callers need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedSession {
    pub user: UserId,
    pub fresh: bool,
}

/// Mints and validates session tokens bound to a user identity.
pub struct SessionSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl SessionSigner {
    pub fn new(secret: &str, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Exact expiry semantics; the default 60s leeway would blur the
        // expired/valid boundary.
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            access_ttl,
            refresh_ttl,
        }
    }

    /// Issue an access token. `fresh` is true only for login-minted tokens,
    /// never for refreshed ones.
    pub fn issue_access(&self, user: UserId, fresh: bool) -> Result<String, IdentityError> {
        self.issue(user, TokenKind::Access, self.access_ttl, fresh)
    }

    pub fn issue_refresh(&self, user: UserId) -> Result<String, IdentityError> {
        self.issue(user, TokenKind::Refresh, self.refresh_ttl, false)
    }

    fn issue(
        &self,
        user: UserId,
        kind: TokenKind,
        ttl: Duration,
        fresh: bool,
    ) -> Result<String, IdentityError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.to_string(),
            iat: now,
            exp: now + ttl.as_secs() as i64,
            kind,
            fresh,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| IdentityError::internal(format!("token encoding failed: {e}")))
    }

    /// Validate a token of the expected kind and extract the bound identity.
    ///
    /// Failure modes collapse to two signals: `TokenExpired` for an expired
    /// signature, `TokenInvalid` for everything else (bad signature,
    /// malformed claims, wrong kind, unparseable subject).
    pub fn validate(
        &self,
        token: &str,
        expected: TokenKind,
    ) -> Result<ValidatedSession, IdentityError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => IdentityError::TokenExpired,
                _ => IdentityError::TokenInvalid,
            }
        })?;

        if data.claims.kind != expected {
            return Err(IdentityError::TokenInvalid);
        }

        let user: UserId = data
            .claims
            .sub
            .parse()
            .map_err(|_| IdentityError::TokenInvalid)?;

        Ok(ValidatedSession {
            user,
            fresh: data.claims.fresh,
        })
    }
}
