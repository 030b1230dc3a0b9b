//! Mentor directory service
//!
//! Mentor profiles, their service offerings and bookable time slots.

use chrono::Utc;
use mentor_core::entities::{Mentor, ServiceOffering, TimeSlot};
use mentor_core::{DomainError, MentorQuery, SlotQuery, TimeWindow, UserRole};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::dto::{
    CreateMentorRequest, CreateServiceRequest, CreateTimeSlotRequest, MentorListQuery,
    MentorResponse, PaginatedResponse, ServiceResponse, SlotListQuery, TimeSlotResponse,
    UpdateMentorRequest,
};

use super::access::{AccessService, Actor};
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Mentor directory service
pub struct MentorService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MentorService<'a> {
    /// Create a new MentorService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    // =========================================================================
    // Profiles
    // =========================================================================

    /// Publish the caller's mentor profile; one per user
    #[instrument(skip(self, request), fields(user_id = %actor.user_id))]
    pub async fn create_profile(
        &self,
        actor: Actor,
        request: CreateMentorRequest,
    ) -> ServiceResult<MentorResponse> {
        if !actor.role.can_mentor() {
            return Err(DomainError::RoleRequired(UserRole::Mentor).into());
        }

        self.ctx
            .user_repo()
            .find_by_id(actor.user_id)
            .await?
            .ok_or(DomainError::UserNotFound(actor.user_id))?;

        if self.ctx.mentor_repo().find_by_user_id(actor.user_id).await?.is_some() {
            return Err(DomainError::MentorProfileExists.into());
        }

        let mut mentor = Mentor::new(Uuid::new_v4(), actor.user_id, request.title);
        mentor.bio = request.bio;
        mentor.expertise = normalize_tags(request.expertise);
        mentor.hourly_rate_cents = request.hourly_rate_cents;
        if let Some(currency) = request.currency {
            mentor.currency = currency.to_uppercase();
        }
        if let Some(timezone) = request.timezone {
            mentor.timezone = timezone;
        }

        self.ctx.mentor_repo().create(&mentor).await?;

        info!(mentor_id = %mentor.id, user_id = %mentor.user_id, "Mentor profile created");
        Ok(MentorResponse::from(mentor))
    }

    /// Update a profile owned by the caller
    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        actor: Actor,
        mentor_id: Uuid,
        request: UpdateMentorRequest,
    ) -> ServiceResult<MentorResponse> {
        let mut mentor = AccessService::new(self.ctx).owned_mentor(actor, mentor_id).await?;

        if request.is_verified.is_some() && !actor.is_admin() {
            return Err(ServiceError::permission_denied("only admins can verify mentors"));
        }

        let mut changed = false;

        if let Some(title) = request.title {
            mentor.title = title;
            changed = true;
        }
        if let Some(bio) = request.bio {
            mentor.bio = Some(bio);
            changed = true;
        }
        if let Some(expertise) = request.expertise {
            mentor.expertise = normalize_tags(expertise);
            changed = true;
        }
        if let Some(rate) = request.hourly_rate_cents {
            mentor.hourly_rate_cents = rate;
            changed = true;
        }
        if let Some(currency) = request.currency {
            mentor.currency = currency.to_uppercase();
            changed = true;
        }
        if let Some(timezone) = request.timezone {
            mentor.timezone = timezone;
            changed = true;
        }
        if let Some(is_active) = request.is_active {
            mentor.is_active = is_active;
            changed = true;
        }
        if let Some(is_verified) = request.is_verified {
            mentor.is_verified = is_verified;
            changed = true;
        }

        if changed {
            mentor.updated_at = Utc::now();
            self.ctx.mentor_repo().update(&mentor).await?;
            info!(mentor_id = %mentor.id, "Mentor profile updated");
        }

        Ok(MentorResponse::from(mentor))
    }

    /// Get a mentor profile by ID
    #[instrument(skip(self))]
    pub async fn get_mentor(&self, mentor_id: Uuid) -> ServiceResult<MentorResponse> {
        let mentor = self.get_mentor_entity(mentor_id).await?;
        Ok(MentorResponse::from(mentor))
    }

    /// Get the mentor entity by ID
    pub async fn get_mentor_entity(&self, mentor_id: Uuid) -> ServiceResult<Mentor> {
        self.ctx
            .mentor_repo()
            .find_by_id(mentor_id)
            .await?
            .ok_or_else(|| DomainError::MentorNotFound(mentor_id).into())
    }

    /// Browse active mentors
    #[instrument(skip(self))]
    pub async fn browse(&self, query: MentorListQuery) -> ServiceResult<PaginatedResponse<MentorResponse>> {
        let search = MentorQuery {
            search: query.search.filter(|s| !s.trim().is_empty()),
            expertise: query.expertise.map(|tag| tag.trim().to_lowercase()).filter(|t| !t.is_empty()),
            limit: query.limit,
            offset: query.offset,
        };

        let mentors = self.ctx.mentor_repo().search(&search).await?;
        let data = mentors.into_iter().map(MentorResponse::from).collect();

        Ok(PaginatedResponse::new(data, query.limit, query.offset))
    }

    // =========================================================================
    // Service Offerings
    // =========================================================================

    /// Add an offering to a profile owned by the caller
    #[instrument(skip(self, request))]
    pub async fn create_service(
        &self,
        actor: Actor,
        mentor_id: Uuid,
        request: CreateServiceRequest,
    ) -> ServiceResult<ServiceResponse> {
        let mentor = AccessService::new(self.ctx).owned_mentor(actor, mentor_id).await?;

        let currency = request
            .currency
            .map_or_else(|| mentor.currency.clone(), |c| c.to_uppercase());
        let service = ServiceOffering::new(
            Uuid::new_v4(),
            mentor.id,
            request.name,
            request.duration_minutes,
            request.price_cents,
            currency,
        )
        .with_description(request.description);

        self.ctx.service_repo().create(&service).await?;

        info!(service_id = %service.id, mentor_id = %mentor.id, "Service created");
        Ok(ServiceResponse::from(service))
    }

    /// Active offerings of a mentor
    #[instrument(skip(self))]
    pub async fn list_services(&self, mentor_id: Uuid) -> ServiceResult<Vec<ServiceResponse>> {
        self.get_mentor_entity(mentor_id).await?;

        let services = self.ctx.service_repo().find_by_mentor(mentor_id, true).await?;
        Ok(services.into_iter().map(ServiceResponse::from).collect())
    }

    /// Stop offering a service; existing bookings are unaffected
    #[instrument(skip(self))]
    pub async fn deactivate_service(
        &self,
        actor: Actor,
        mentor_id: Uuid,
        service_id: Uuid,
    ) -> ServiceResult<()> {
        AccessService::new(self.ctx).owned_mentor(actor, mentor_id).await?;

        let service = self
            .ctx
            .service_repo()
            .find_by_id(service_id)
            .await?
            .filter(|s| s.mentor_id == mentor_id)
            .ok_or(DomainError::ServiceNotFound(service_id))?;

        self.ctx.service_repo().set_active(service.id, false).await?;

        info!(service_id = %service.id, mentor_id = %mentor_id, "Service deactivated");
        Ok(())
    }

    // =========================================================================
    // Time Slots
    // =========================================================================

    /// Open a bookable slot for one of the mentor's offerings
    #[instrument(skip(self, request))]
    pub async fn create_time_slot(
        &self,
        actor: Actor,
        mentor_id: Uuid,
        request: CreateTimeSlotRequest,
    ) -> ServiceResult<TimeSlotResponse> {
        let mentor = AccessService::new(self.ctx).owned_mentor(actor, mentor_id).await?;

        let window = TimeWindow::new(request.start_date_time, request.end_date_time)
            .ok_or(DomainError::InvalidTimeRange)?;
        if window.start <= Utc::now() {
            return Err(ServiceError::validation("Time slot must start in the future"));
        }

        let service = self
            .ctx
            .service_repo()
            .find_by_id(request.service_id)
            .await?
            .ok_or(DomainError::ServiceNotFound(request.service_id))?;
        if service.mentor_id != mentor.id {
            return Err(ServiceError::validation("Service does not belong to this mentor"));
        }

        let slot = TimeSlot::new(Uuid::new_v4(), mentor.id, service.id, window, request.max_bookings)?;
        self.ctx.time_slot_repo().create(&slot).await?;

        info!(
            slot_id = %slot.id,
            mentor_id = %mentor.id,
            service_id = %service.id,
            max_bookings = slot.max_bookings,
            "Time slot created"
        );
        Ok(TimeSlotResponse::from(slot))
    }

    /// Future slots that still have capacity
    #[instrument(skip(self))]
    pub async fn list_available_slots(
        &self,
        mentor_id: Uuid,
        query: SlotListQuery,
    ) -> ServiceResult<Vec<TimeSlotResponse>> {
        if let (Some(from), Some(to)) = (query.from, query.to) {
            if from > to {
                return Err(ServiceError::validation("`from` must not be after `to`"));
            }
        }
        self.get_mentor_entity(mentor_id).await?;

        let range = SlotQuery {
            from: query.from,
            to: query.to,
        };
        let slots = self
            .ctx
            .time_slot_repo()
            .find_available(mentor_id, range, Utc::now())
            .await?;

        Ok(slots.into_iter().map(TimeSlotResponse::from).collect())
    }

    /// Withdraw a slot from sale
    #[instrument(skip(self))]
    pub async fn deactivate_time_slot(
        &self,
        actor: Actor,
        mentor_id: Uuid,
        slot_id: Uuid,
    ) -> ServiceResult<()> {
        AccessService::new(self.ctx).owned_mentor(actor, mentor_id).await?;

        let slot = self
            .ctx
            .time_slot_repo()
            .find_by_id(slot_id)
            .await?
            .filter(|s| s.mentor_id == mentor_id)
            .ok_or(DomainError::TimeSlotNotFound(slot_id))?;

        self.ctx.time_slot_repo().deactivate(slot.id).await?;

        info!(slot_id = %slot.id, mentor_id = %mentor_id, "Time slot deactivated");
        Ok(())
    }
}

/// Trim, lowercase and de-duplicate expertise tags, keeping first-seen order
fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}
