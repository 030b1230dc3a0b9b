//! User service
//!
//! Mirrors identity-provider profiles into the local user table.

use mentor_core::entities::User;
use mentor_core::DomainError;
use tracing::{info, instrument};

use crate::dto::{SyncProfileRequest, UserResponse};

use super::access::Actor;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Identity claims the access token carries for the caller
#[derive(Debug, Clone)]
pub struct TokenProfile {
    pub email: String,
    pub name: Option<String>,
}

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Insert or refresh the caller's user row.
    ///
    /// The request name wins over the token name; the email local part is
    /// the last resort.
    #[instrument(skip(self, profile, request), fields(user_id = %actor.user_id))]
    pub async fn sync_profile(
        &self,
        actor: Actor,
        profile: TokenProfile,
        request: SyncProfileRequest,
    ) -> ServiceResult<UserResponse> {
        let name = request
            .name
            .or(profile.name)
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| fallback_name(&profile.email));

        let user = User::new(actor.user_id, profile.email, name, actor.role).with_image(request.image_url);
        let stored = self.ctx.user_repo().upsert(&user).await?;

        info!(user_id = %stored.id, role = %stored.role, "User profile synced");
        Ok(UserResponse::from(stored))
    }

    /// Get the caller's stored profile
    #[instrument(skip(self))]
    pub async fn get_current_user(&self, actor: Actor) -> ServiceResult<UserResponse> {
        let user = self.get_user_entity(actor).await?;
        Ok(UserResponse::from(user))
    }

    /// Get the caller's user entity
    pub async fn get_user_entity(&self, actor: Actor) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(actor.user_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(actor.user_id).into())
    }
}

fn fallback_name(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}
