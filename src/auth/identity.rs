//! Bearer token → user record.
//!
//! Every protected handler goes through `IdentityResolver::resolve` (via the
//! `Identity` extractor). The lookup is read-only, so calling it once per
//! request has no side effects.

use axum::http::{header::AUTHORIZATION, HeaderMap};
use thiserror::Error;

use super::token::{TokenError, TokenService};
use crate::database::models::User;
use crate::database::{DatabaseError, UserStore};

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Authorization token required")]
    MissingCredentials,

    #[error("Invalid Authorization header format")]
    MalformedHeader,

    #[error("Invalid token")]
    InvalidToken,

    /// The token verified but its account no longer exists
    #[error("User not found")]
    UnknownSubject,

    #[error(transparent)]
    Storage(#[from] DatabaseError),
}

impl From<TokenError> for IdentityError {
    fn from(_: TokenError) -> Self {
        IdentityError::InvalidToken
    }
}

/// Pull the token out of an `Authorization: Bearer <token>` header.
///
/// The value must split on single spaces into exactly `Bearer` and one
/// non-empty token.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, IdentityError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(IdentityError::MissingCredentials)?;
    let value = value.to_str().map_err(|_| IdentityError::MalformedHeader)?;

    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(IdentityError::MalformedHeader),
    }
}

pub struct IdentityResolver<'a, S: ?Sized> {
    tokens: &'a TokenService,
    users: &'a S,
}

impl<'a, S> IdentityResolver<'a, S>
where
    S: UserStore + ?Sized,
{
    pub fn new(tokens: &'a TokenService, users: &'a S) -> Self {
        Self { tokens, users }
    }

    /// Verified subject email, without touching storage
    pub fn subject(&self, headers: &HeaderMap) -> Result<String, IdentityError> {
        let token = bearer_token(headers)?;
        Ok(self.tokens.verify(token)?)
    }

    /// Verified subject resolved to its user row
    pub async fn resolve(&self, headers: &HeaderMap) -> Result<User, IdentityError> {
        let email = self.subject(headers)?;
        match self.users.find_user_by_email(&email).await? {
            Some(user) => Ok(user),
            None => {
                tracing::warn!("Token subject '{}' has no matching account", email);
                Err(IdentityError::UnknownSubject)
            }
        }
    }
}
