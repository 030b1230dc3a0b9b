//! Availability service
//!
//! A mentor's recurring weekly schedule, always replaced as a whole.

use mentor_core::entities::NewAvailability;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::dto::{AvailabilityResponse, ReplaceAvailabilityRequest};

use super::access::{AccessService, Actor};
use super::context::ServiceContext;
use super::error::ServiceResult;
use super::mentor::MentorService;

/// Availability service
pub struct AvailabilityService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AvailabilityService<'a> {
    /// Create a new AvailabilityService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Weekly schedule ordered by day, then start time
    #[instrument(skip(self))]
    pub async fn get_availability(&self, mentor_id: Uuid) -> ServiceResult<Vec<AvailabilityResponse>> {
        MentorService::new(self.ctx).get_mentor_entity(mentor_id).await?;

        let rows = self.ctx.availability_repo().find_by_mentor(mentor_id).await?;
        Ok(rows.into_iter().map(AvailabilityResponse::from).collect())
    }

    /// Swap the whole schedule for `request.slots`; an empty list clears it
    #[instrument(skip(self, request), fields(count = request.slots.len()))]
    pub async fn replace_all(
        &self,
        actor: Actor,
        mentor_id: Uuid,
        request: ReplaceAvailabilityRequest,
    ) -> ServiceResult<Vec<AvailabilityResponse>> {
        AccessService::new(self.ctx).owned_mentor(actor, mentor_id).await?;

        let slots = request
            .slots
            .into_iter()
            .map(|slot| NewAvailability {
                day_of_week: slot.day_of_week,
                start_time: slot.start_time,
                end_time: slot.end_time,
                timezone: slot.timezone,
                is_active: slot.is_active,
            })
            .collect::<Vec<_>>();
        for slot in &slots {
            slot.validate()?;
        }

        let rows = self.ctx.availability_repo().replace_all(mentor_id, slots).await?;

        info!(mentor_id = %mentor_id, windows = rows.len(), "Availability replaced");
        Ok(rows.into_iter().map(AvailabilityResponse::from).collect())
    }
}
