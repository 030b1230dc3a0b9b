//! Booking entity - a student's reservation of one time slot

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::DomainError;
use crate::value_objects::{BookingStatus, PaymentStatus};

/// Booking entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: Uuid,
    pub student_id: Uuid,
    pub mentor_id: Uuid,
    pub service_id: Uuid,
    pub time_slot_id: Uuid,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub price_cents: i64,
    pub platform_fee_cents: i64,
    pub mentor_earnings_cents: i64,
    pub currency: String,
    pub student_notes: Option<String>,
    pub mentor_notes: Option<String>,
    pub meeting_url: Option<String>,
    pub cancelled_by: Option<Uuid>,
    pub cancellation_reason: Option<String>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Price breakdown of a booking, in minor currency units
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingPrice {
    pub price_cents: i64,
    pub platform_fee_cents: i64,
    pub mentor_earnings_cents: i64,
    pub currency: String,
}

impl BookingPrice {
    /// Split `price_cents` into platform fee and mentor earnings.
    ///
    /// The fee is rounded down so the mentor never receives less than
    /// `price - price * percent / 100`.
    pub fn split(price_cents: i64, fee_percent: u8, currency: impl Into<String>) -> Self {
        let fee = price_cents.max(0) * i64::from(fee_percent.min(100)) / 100;
        Self {
            price_cents,
            platform_fee_cents: fee,
            mentor_earnings_cents: price_cents - fee,
            currency: currency.into(),
        }
    }
}

/// Data for a booking insert
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub id: Uuid,
    pub student_id: Uuid,
    pub mentor_id: Uuid,
    pub service_id: Uuid,
    pub time_slot_id: Uuid,
    pub price: BookingPrice,
    pub student_notes: Option<String>,
}

impl NewBooking {
    /// Materialize the row as it looks right after insert
    pub fn into_booking(self, now: DateTime<Utc>) -> Booking {
        Booking {
            id: self.id,
            student_id: self.student_id,
            mentor_id: self.mentor_id,
            service_id: self.service_id,
            time_slot_id: self.time_slot_id,
            status: BookingStatus::Pending,
            payment_status: PaymentStatus::Pending,
            price_cents: self.price.price_cents,
            platform_fee_cents: self.price.platform_fee_cents,
            mentor_earnings_cents: self.price.mentor_earnings_cents,
            currency: self.price.currency,
            student_notes: self.student_notes,
            mentor_notes: None,
            meeting_url: None,
            cancelled_by: None,
            cancellation_reason: None,
            cancelled_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Booking {
    /// Cancelled and completed bookings cannot be cancelled again
    pub fn ensure_cancellable(&self) -> Result<(), DomainError> {
        if self.status.is_terminal() {
            return Err(DomainError::BookingFinalized(self.status));
        }
        Ok(())
    }

    /// Mark as cancelled by `by`
    pub fn cancel(&mut self, by: Uuid, reason: Option<String>, now: DateTime<Utc>) -> Result<(), DomainError> {
        self.ensure_cancellable()?;
        self.status = BookingStatus::Cancelled;
        self.cancelled_by = Some(by);
        self.cancellation_reason = reason;
        self.cancelled_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Validate a lifecycle transition without applying it
    pub fn check_transition(&self, next: BookingStatus) -> Result<(), DomainError> {
        if !self.status.can_transition_to(next) {
            return Err(DomainError::InvalidStatusTransition {
                from: self.status,
                to: next,
            });
        }
        Ok(())
    }

    /// Apply a payment status change
    pub fn set_payment_status(&mut self, next: PaymentStatus) -> Result<(), DomainError> {
        if !self.payment_status.can_transition_to(next) {
            return Err(DomainError::InvalidPaymentTransition {
                from: self.payment_status,
                to: next,
            });
        }
        self.payment_status = next;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Whether the booking still holds a unit of slot capacity
    #[inline]
    pub fn holds_capacity(&self) -> bool {
        self.status != BookingStatus::Cancelled
    }
}
