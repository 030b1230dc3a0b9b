//! Authentication extractor
//!
//! Extracts and validates JWT access tokens from the Authorization header.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use mentor_common::Claims;
use mentor_service::{Actor, TokenProfile};
use uuid::Uuid;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated caller extracted from the access token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub actor: Actor,
    pub email: String,
    pub name: Option<String>,
}

impl AuthUser {
    /// The caller's user ID
    pub fn user_id(&self) -> Uuid {
        self.actor.user_id
    }

    /// Identity claims to mirror into the user table
    pub fn profile(&self) -> TokenProfile {
        TokenProfile {
            email: self.email.clone(),
            name: self.name.clone(),
        }
    }

    fn from_claims(claims: Claims) -> Result<Self, ApiError> {
        let user_id = claims.user_id().map_err(|e| {
            tracing::warn!(error = %e, "Invalid user ID in token");
            ApiError::InvalidToken
        })?;

        Ok(Self {
            actor: Actor::new(user_id, claims.role),
            email: claims.email,
            name: claims.name,
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);

        let claims = app_state
            .jwt_service()
            .validate_access_token(bearer.token())
            .map_err(|e| {
                tracing::warn!(error = %e, "Rejected access token");
                ApiError::InvalidToken
            })?;

        AuthUser::from_claims(claims)
    }
}
