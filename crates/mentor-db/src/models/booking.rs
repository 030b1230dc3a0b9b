//! Booking database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for bookings table
#[derive(Debug, Clone, FromRow)]
pub struct BookingModel {
    pub id: Uuid,
    pub student_id: Uuid,
    pub mentor_id: Uuid,
    pub service_id: Uuid,
    pub time_slot_id: Uuid,
    pub status: String,
    pub payment_status: String,
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
