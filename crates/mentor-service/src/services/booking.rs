//! Booking service
//!
//! Validates callers and catalogue state, then hands the capacity-sensitive
//! work to the booking repository, which runs each mutation as one
//! transaction.

use mentor_core::entities::{Booking, BookingPrice, NewBooking};
use mentor_core::{BookingQuery, BookingStatus, DomainError};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::dto::{
    BookingResponse, CancelRequest, CreateBookingRequest, ListQuery, ListRole, PaginatedResponse,
    UpdatePaymentStatusRequest, UpdateStatusRequest,
};

use super::access::{AccessService, Actor};
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Booking service
pub struct BookingService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BookingService<'a> {
    /// Create a new BookingService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Reserve one unit of a slot for a student
    #[instrument(skip(self, request), fields(user_id = %actor.user_id, slot_id = %request.time_slot_id))]
    pub async fn create_booking(
        &self,
        actor: Actor,
        request: CreateBookingRequest,
    ) -> ServiceResult<BookingResponse> {
        let student_id = match request.student_id {
            Some(id) if id != actor.user_id && !actor.is_admin() => {
                return Err(ServiceError::permission_denied(
                    "only admins can book on behalf of another student",
                ));
            }
            Some(id) => id,
            None => actor.user_id,
        };

        self.ctx
            .user_repo()
            .find_by_id(student_id)
            .await?
            .ok_or(DomainError::UserNotFound(student_id))?;

        let mentor = self
            .ctx
            .mentor_repo()
            .find_by_id(request.mentor_id)
            .await?
            .ok_or(DomainError::MentorNotFound(request.mentor_id))?;
        if !mentor.is_active {
            return Err(DomainError::MentorInactive.into());
        }
        if mentor.is_owned_by(student_id) {
            return Err(DomainError::CannotBookSelf.into());
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
        if !service.is_bookable_with(mentor.id) {
            return Err(DomainError::ServiceInactive.into());
        }

        let price = BookingPrice::split(
            service.price_cents,
            self.ctx.booking_config().platform_fee_percent,
            service.currency.clone(),
        );
        let new_booking = NewBooking {
            id: Uuid::new_v4(),
            student_id,
            mentor_id: mentor.id,
            service_id: service.id,
            time_slot_id: request.time_slot_id,
            price,
            student_notes: request.student_notes,
        };

        let booking = self
            .ctx
            .booking_repo()
            .create_with_slot_reservation(new_booking)
            .await?;

        info!(
            booking_id = %booking.id,
            student_id = %booking.student_id,
            mentor_id = %booking.mentor_id,
            price_cents = booking.price_cents,
            "Booking created"
        );
        Ok(BookingResponse::from(booking))
    }

    /// Cancel a booking and release its slot capacity
    #[instrument(skip(self, request))]
    pub async fn cancel_booking(
        &self,
        actor: Actor,
        booking_id: Uuid,
        request: CancelRequest,
    ) -> ServiceResult<BookingResponse> {
        let booking = self.get_booking_entity(booking_id).await?;
        AccessService::new(self.ctx)
            .require_participant(actor, booking.student_id, booking.mentor_id)
            .await?;

        let cancelled = self.cancel_unchecked(actor, &booking, request.reason).await?;
        Ok(BookingResponse::from(cancelled))
    }

    /// Move a booking through its lifecycle (mentor or admin)
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        actor: Actor,
        booking_id: Uuid,
        request: UpdateStatusRequest,
    ) -> ServiceResult<BookingResponse> {
        let booking = self.get_booking_entity(booking_id).await?;
        AccessService::new(self.ctx)
            .require_mentor_side(actor, booking.mentor_id)
            .await?;

        booking.check_transition(request.status)?;

        let updated = if request.status == BookingStatus::Cancelled {
            self.cancel_unchecked(actor, &booking, None).await?
        } else {
            let updated = self
                .ctx
                .booking_repo()
                .update_status(booking_id, request.status)
                .await?;
            info!(booking_id = %booking_id, from = %booking.status, to = %updated.status, "Booking status updated");
            updated
        };

        Ok(BookingResponse::from(updated))
    }

    /// Record a payment outcome (mentor or admin)
    #[instrument(skip(self))]
    pub async fn update_payment_status(
        &self,
        actor: Actor,
        booking_id: Uuid,
        request: UpdatePaymentStatusRequest,
    ) -> ServiceResult<BookingResponse> {
        let booking = self.get_booking_entity(booking_id).await?;
        AccessService::new(self.ctx)
            .require_mentor_side(actor, booking.mentor_id)
            .await?;

        let updated = self
            .ctx
            .booking_repo()
            .update_payment_status(booking_id, request.payment_status)
            .await?;

        info!(
            booking_id = %booking_id,
            from = %booking.payment_status,
            to = %updated.payment_status,
            "Booking payment status updated"
        );
        Ok(BookingResponse::from(updated))
    }

    /// Get a booking the caller takes part in
    #[instrument(skip(self))]
    pub async fn get_booking(&self, actor: Actor, booking_id: Uuid) -> ServiceResult<BookingResponse> {
        let booking = self.get_booking_entity(booking_id).await?;
        AccessService::new(self.ctx)
            .require_participant(actor, booking.student_id, booking.mentor_id)
            .await?;

        Ok(BookingResponse::from(booking))
    }

    /// Bookings where the caller is the student, the mentor, or both
    #[instrument(skip(self))]
    pub async fn list_my_bookings(
        &self,
        actor: Actor,
        query: ListQuery,
    ) -> ServiceResult<PaginatedResponse<BookingResponse>> {
        let mentor_id = match query.role {
            Some(ListRole::Student) => None,
            _ => AccessService::new(self.ctx)
                .own_mentor_profile(actor)
                .await?
                .map(|m| m.id),
        };

        let (student_id, mentor_id) = match query.role {
            Some(ListRole::Student) => (Some(actor.user_id), None),
            Some(ListRole::Mentor) => match mentor_id {
                Some(id) => (None, Some(id)),
                None => return Ok(PaginatedResponse::new(Vec::new(), query.limit, query.offset)),
            },
            None => (Some(actor.user_id), mentor_id),
        };

        let bookings = self
            .ctx
            .booking_repo()
            .find_many(&BookingQuery {
                student_id,
                mentor_id,
                status: query.status,
                limit: query.limit,
                offset: query.offset,
            })
            .await?;

        let data = bookings.into_iter().map(BookingResponse::from).collect();
        Ok(PaginatedResponse::new(data, query.limit, query.offset))
    }

    /// Get booking entity by ID
    pub async fn get_booking_entity(&self, booking_id: Uuid) -> ServiceResult<Booking> {
        self.ctx
            .booking_repo()
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| DomainError::BookingNotFound(booking_id).into())
    }

    async fn cancel_unchecked(
        &self,
        actor: Actor,
        booking: &Booking,
        reason: Option<String>,
    ) -> ServiceResult<Booking> {
        if let Err(e) = booking.ensure_cancellable() {
            warn!(booking_id = %booking.id, status = %booking.status, "Rejected cancel of finalized booking");
            return Err(e.into());
        }

        let cancelled = self
            .ctx
            .booking_repo()
            .cancel(booking.id, actor.user_id, reason)
            .await?;

        info!(
            booking_id = %cancelled.id,
            cancelled_by = %actor.user_id,
            slot_id = %cancelled.time_slot_id,
            "Booking cancelled"
        );
        Ok(cancelled)
    }
}
