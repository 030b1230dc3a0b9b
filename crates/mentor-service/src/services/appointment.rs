//! Appointment service
//!
//! Free-form appointments on a mentor's calendar. Two pending or confirmed
//! appointments of the same mentor never overlap; the repository enforces
//! that under the mentor's row lock.

use chrono::{DateTime, Utc};
use mentor_core::entities::{Appointment, NewAppointment};
use mentor_core::{AppointmentQuery, BookingStatus, DomainError, TimeWindow};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::dto::{
    AppointmentResponse, CancelRequest, ConflictQuery, CreateAppointmentRequest, ListQuery, ListRole,
    PaginatedResponse, RescheduleAppointmentRequest, UpdateStatusRequest,
    MAX_APPOINTMENT_MINUTES, MIN_APPOINTMENT_MINUTES,
};

use super::access::{AccessService, Actor};
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Appointment service
pub struct AppointmentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AppointmentService<'a> {
    /// Create a new AppointmentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Book a free-form appointment with a mentor
    #[instrument(skip(self, request), fields(user_id = %actor.user_id, mentor_id = %request.mentor_id))]
    pub async fn create_appointment(
        &self,
        actor: Actor,
        request: CreateAppointmentRequest,
    ) -> ServiceResult<AppointmentResponse> {
        let window = candidate_window(request.scheduled_at, request.duration_minutes, Utc::now())?;

        self.ctx
            .user_repo()
            .find_by_id(actor.user_id)
            .await?
            .ok_or(DomainError::UserNotFound(actor.user_id))?;

        let mentor = self
            .ctx
            .mentor_repo()
            .find_by_id(request.mentor_id)
            .await?
            .ok_or(DomainError::MentorNotFound(request.mentor_id))?;
        if !mentor.is_active {
            return Err(DomainError::MentorInactive.into());
        }
        if mentor.is_owned_by(actor.user_id) {
            return Err(DomainError::CannotBookSelf.into());
        }

        let appointment = self
            .ctx
            .appointment_repo()
            .create_checked(NewAppointment {
                id: Uuid::new_v4(),
                mentor_id: mentor.id,
                user_id: actor.user_id,
                window,
                notes: request.notes,
            })
            .await
            .inspect_err(|e| {
                if let DomainError::SchedulingConflict { count } = e {
                    warn!(count, "Appointment overlaps the mentor's calendar");
                }
            })?;

        info!(
            appointment_id = %appointment.id,
            scheduled_at = %appointment.scheduled_at,
            duration_minutes = appointment.duration_minutes,
            "Appointment created"
        );
        Ok(AppointmentResponse::from(appointment))
    }

    /// Move an appointment to a new time; it goes back to pending
    #[instrument(skip(self, request))]
    pub async fn reschedule_appointment(
        &self,
        actor: Actor,
        appointment_id: Uuid,
        request: RescheduleAppointmentRequest,
    ) -> ServiceResult<AppointmentResponse> {
        let appointment = self.get_appointment_entity(appointment_id).await?;
        AccessService::new(self.ctx)
            .require_participant(actor, appointment.user_id, appointment.mentor_id)
            .await?;
        appointment.ensure_modifiable()?;

        let duration = request.duration_minutes.unwrap_or(appointment.duration_minutes);
        let window = candidate_window(request.scheduled_at, duration, Utc::now())?;

        let moved = self
            .ctx
            .appointment_repo()
            .reschedule_checked(appointment_id, window)
            .await?;

        info!(
            appointment_id = %moved.id,
            from = %appointment.scheduled_at,
            to = %moved.scheduled_at,
            "Appointment rescheduled"
        );
        Ok(AppointmentResponse::from(moved))
    }

    /// Cancel an appointment (participant or admin)
    #[instrument(skip(self, request))]
    pub async fn cancel_appointment(
        &self,
        actor: Actor,
        appointment_id: Uuid,
        request: CancelRequest,
    ) -> ServiceResult<AppointmentResponse> {
        let appointment = self.get_appointment_entity(appointment_id).await?;
        AccessService::new(self.ctx)
            .require_participant(actor, appointment.user_id, appointment.mentor_id)
            .await?;

        let cancelled = self.cancel_unchecked(actor, &appointment, request.reason).await?;
        Ok(AppointmentResponse::from(cancelled))
    }

    /// Move an appointment through its lifecycle (mentor or admin)
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        actor: Actor,
        appointment_id: Uuid,
        request: UpdateStatusRequest,
    ) -> ServiceResult<AppointmentResponse> {
        let appointment = self.get_appointment_entity(appointment_id).await?;
        AccessService::new(self.ctx)
            .require_mentor_side(actor, appointment.mentor_id)
            .await?;

        appointment.check_transition(request.status)?;

        let updated = if request.status == BookingStatus::Cancelled {
            self.cancel_unchecked(actor, &appointment, None).await?
        } else {
            let updated = self
                .ctx
                .appointment_repo()
                .update_status(appointment_id, request.status)
                .await?;
            info!(
                appointment_id = %appointment_id,
                from = %appointment.status,
                to = %updated.status,
                "Appointment status updated"
            );
            updated
        };

        Ok(AppointmentResponse::from(updated))
    }

    /// Pending or confirmed appointments of a mentor overlapping a candidate
    /// window. `exclude` leaves one appointment out of the scan.
    #[instrument(skip(self))]
    pub async fn find_conflicts(
        &self,
        actor: Actor,
        query: ConflictQuery,
    ) -> ServiceResult<Vec<AppointmentResponse>> {
        AccessService::new(self.ctx)
            .require_mentor_side(actor, query.mentor_id)
            .await?;

        let window = TimeWindow::from_duration(query.scheduled_at, query.duration_minutes)
            .ok_or(DomainError::InvalidTimeRange)?;

        let conflicts = self
            .ctx
            .appointment_repo()
            .find_conflicting(query.mentor_id, window, query.exclude)
            .await?;

        Ok(conflicts.into_iter().map(AppointmentResponse::from).collect())
    }

    /// Get an appointment the caller takes part in
    #[instrument(skip(self))]
    pub async fn get_appointment(
        &self,
        actor: Actor,
        appointment_id: Uuid,
    ) -> ServiceResult<AppointmentResponse> {
        let appointment = self.get_appointment_entity(appointment_id).await?;
        AccessService::new(self.ctx)
            .require_participant(actor, appointment.user_id, appointment.mentor_id)
            .await?;

        Ok(AppointmentResponse::from(appointment))
    }

    /// Appointments where the caller is the client, the mentor, or both
    #[instrument(skip(self))]
    pub async fn list_my_appointments(
        &self,
        actor: Actor,
        query: ListQuery,
    ) -> ServiceResult<PaginatedResponse<AppointmentResponse>> {
        let own_profile = match query.role {
            Some(ListRole::Student) => None,
            _ => AccessService::new(self.ctx)
                .own_mentor_profile(actor)
                .await?
                .map(|m| m.id),
        };

        let (user_id, mentor_id) = match query.role {
            Some(ListRole::Student) => (Some(actor.user_id), None),
            Some(ListRole::Mentor) => match own_profile {
                Some(id) => (None, Some(id)),
                None => return Ok(PaginatedResponse::new(Vec::new(), query.limit, query.offset)),
            },
            None => (Some(actor.user_id), own_profile),
        };

        let appointments = self
            .ctx
            .appointment_repo()
            .find_many(&AppointmentQuery {
                user_id,
                mentor_id,
                status: query.status,
                limit: query.limit,
                offset: query.offset,
            })
            .await?;

        let data = appointments.into_iter().map(AppointmentResponse::from).collect();
        Ok(PaginatedResponse::new(data, query.limit, query.offset))
    }

    /// Get appointment entity by ID
    pub async fn get_appointment_entity(&self, appointment_id: Uuid) -> ServiceResult<Appointment> {
        self.ctx
            .appointment_repo()
            .find_by_id(appointment_id)
            .await?
            .ok_or_else(|| DomainError::AppointmentNotFound(appointment_id).into())
    }

    async fn cancel_unchecked(
        &self,
        actor: Actor,
        appointment: &Appointment,
        reason: Option<String>,
    ) -> ServiceResult<Appointment> {
        appointment.ensure_modifiable()?;

        let cancelled = self
            .ctx
            .appointment_repo()
            .cancel(appointment.id, actor.user_id, reason)
            .await?;

        info!(appointment_id = %cancelled.id, cancelled_by = %actor.user_id, "Appointment cancelled");
        Ok(cancelled)
    }
}

/// Validate a requested start and duration against `now`
fn candidate_window(
    scheduled_at: DateTime<Utc>,
    duration_minutes: i32,
    now: DateTime<Utc>,
) -> ServiceResult<TimeWindow> {
    if !(MIN_APPOINTMENT_MINUTES..=MAX_APPOINTMENT_MINUTES).contains(&duration_minutes) {
        return Err(ServiceError::validation(format!(
            "Duration must be {MIN_APPOINTMENT_MINUTES}-{MAX_APPOINTMENT_MINUTES} minutes"
        )));
    }
    if scheduled_at <= now {
        return Err(ServiceError::validation("Appointment must be scheduled in the future"));
    }
    TimeWindow::from_duration(scheduled_at, duration_minutes)
        .ok_or_else(|| DomainError::InvalidTimeRange.into())
}
