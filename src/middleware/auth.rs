use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::app::AppState;
use crate::auth::IdentityResolver;
use crate::database::models::User;
use crate::error::ApiError;

/// Authenticated caller, resolved from the bearer token on every protected
/// request. Handlers take this as an argument instead of parsing headers.
#[derive(Clone, Debug)]
pub struct Identity(pub User);

#[async_trait]
impl FromRequestParts<AppState> for Identity {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let resolver = IdentityResolver::new(&state.tokens, state.store.as_ref());
        let user = resolver.resolve(&parts.headers).await?;
        Ok(Identity(user))
    }
}

/// Verified token subject without the storage lookup
#[derive(Clone, Debug)]
pub struct Subject(pub String);

#[async_trait]
impl FromRequestParts<AppState> for Subject {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let resolver = IdentityResolver::new(&state.tokens, state.store.as_ref());
        Ok(Subject(resolver.subject(&parts.headers)?))
    }
}
