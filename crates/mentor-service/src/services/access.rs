//! Access checks shared by the services
//!
//! Every mutation names the caller as an [`Actor`]. Admins pass every check;
//! everyone else must be the record's client or own the mentor profile the
//! record belongs to.

use mentor_core::entities::Mentor;
use mentor_core::{DomainError, UserRole};
use tracing::{debug, instrument};
use uuid::Uuid;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// The authenticated caller of a service operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl Actor {
    pub fn new(user_id: Uuid, role: UserRole) -> Self {
        Self { user_id, role }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Access checks backed by the mentor directory
pub struct AccessService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AccessService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// The caller's own mentor profile, if any
    pub async fn own_mentor_profile(&self, actor: Actor) -> ServiceResult<Option<Mentor>> {
        Ok(self.ctx.mentor_repo().find_by_user_id(actor.user_id).await?)
    }

    /// Whether `mentor_id` is the caller's own profile
    pub async fn is_mentor(&self, actor: Actor, mentor_id: Uuid) -> ServiceResult<bool> {
        Ok(self
            .own_mentor_profile(actor)
            .await?
            .is_some_and(|mentor| mentor.id == mentor_id))
    }

    /// Caller must be the client, the mentor, or an admin
    #[instrument(skip(self))]
    pub async fn require_participant(
        &self,
        actor: Actor,
        client_id: Uuid,
        mentor_id: Uuid,
    ) -> ServiceResult<()> {
        if actor.is_admin() || actor.user_id == client_id {
            return Ok(());
        }
        if self.is_mentor(actor, mentor_id).await? {
            return Ok(());
        }
        debug!(user_id = %actor.user_id, "Caller is not a participant");
        Err(DomainError::NotParticipant.into())
    }

    /// Caller must own `mentor_id` or be an admin
    #[instrument(skip(self))]
    pub async fn require_mentor_side(&self, actor: Actor, mentor_id: Uuid) -> ServiceResult<()> {
        if actor.is_admin() || self.is_mentor(actor, mentor_id).await? {
            return Ok(());
        }
        Err(DomainError::NotMentorOwner.into())
    }

    /// Load a mentor profile the caller may manage
    #[instrument(skip(self))]
    pub async fn owned_mentor(&self, actor: Actor, mentor_id: Uuid) -> ServiceResult<Mentor> {
        let mentor = self
            .ctx
            .mentor_repo()
            .find_by_id(mentor_id)
            .await?
            .ok_or_else(|| ServiceError::from(DomainError::MentorNotFound(mentor_id)))?;

        if !actor.is_admin() && !mentor.is_owned_by(actor.user_id) {
            return Err(DomainError::NotMentorOwner.into());
        }
        Ok(mentor)
    }
}
