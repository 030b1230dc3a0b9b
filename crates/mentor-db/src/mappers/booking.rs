//! Booking entity <-> model mapper

use mentor_core::entities::Booking;
use mentor_core::error::DomainError;

use crate::models::BookingModel;

use super::parse_column;

impl TryFrom<BookingModel> for Booking {
    type Error = DomainError;

    fn try_from(model: BookingModel) -> Result<Self, Self::Error> {
        Ok(Booking {
            id: model.id,
            student_id: model.student_id,
            mentor_id: model.mentor_id,
            service_id: model.service_id,
            time_slot_id: model.time_slot_id,
            status: parse_column("bookings.status", &model.status)?,
            payment_status: parse_column("bookings.payment_status", &model.payment_status)?,
            price_cents: model.price_cents,
            platform_fee_cents: model.platform_fee_cents,
            mentor_earnings_cents: model.mentor_earnings_cents,
            currency: model.currency,
            student_notes: model.student_notes,
            mentor_notes: model.mentor_notes,
            meeting_url: model.meeting_url,
            cancelled_by: model.cancelled_by,
            cancellation_reason: model.cancellation_reason,
            cancelled_at: model.cancelled_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

/// Convert a batch of rows
pub fn bookings_from_models(models: Vec<BookingModel>) -> Result<Vec<Booking>, DomainError> {
    models.into_iter().map(Booking::try_from).collect()
}
